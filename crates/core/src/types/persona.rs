//! The two kinds of profile the product onboards.

use serde::{Deserialize, Serialize};

/// Which side of the marketplace a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Investor,
    Startup,
}

impl Persona {
    /// Lowercase noun, e.g. `"investor"`.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Startup => "startup",
        }
    }

    /// Capitalized noun, e.g. `"Investor"`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Investor => "Investor",
            Self::Startup => "Startup",
        }
    }

    /// Noun with its indefinite article, e.g. `"An investor"`.
    #[must_use]
    pub const fn with_article(self) -> &'static str {
        match self {
            Self::Investor => "An investor",
            Self::Startup => "A startup",
        }
    }

    /// The persona this one gets matched with.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Investor => Self::Startup,
            Self::Startup => Self::Investor,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investor" => Ok(Self::Investor),
            "startup" => Ok(Self::Startup),
            _ => Err(format!("invalid persona: {s}")),
        }
    }
}
