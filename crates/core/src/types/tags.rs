//! Fixed tag enumerations shared by client and server.
//!
//! Every tag round-trips through its exact display string. Matching is
//! case-sensitive: `"technology"` is not a [`Sector`].

use thiserror::Error;

/// Error returned when a string is not one of a tag set's members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownTag {
    /// Human name of the tag set.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Common behaviour of the fixed tag sets.
pub trait Tag: Sized + Copy + 'static {
    /// Human name of the tag set, used in error text.
    const KIND: &'static str;

    /// Every member, in display order.
    fn all() -> &'static [Self];

    /// The exact wire string.
    fn as_str(self) -> &'static str;

    /// Parse an exact wire string.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTag`] when `value` is not a member.
    fn parse(value: &str) -> Result<Self, UnknownTag> {
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| UnknownTag {
                kind: Self::KIND,
                value: value.to_owned(),
            })
    }
}

/// Define a tag enumeration whose serde form is its exact display string.
macro_rules! define_tags {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl Tag for $name {
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Tag>::parse(s)
            }
        }
    };
}

define_tags! {
    /// Sectors an investor can focus on.
    Sector, "sector" {
        Technology => "Technology",
        Healthcare => "Healthcare",
        Fintech => "Fintech",
        ECommerce => "E-commerce",
        AiMl => "AI/ML",
        SaaS => "SaaS",
        Biotech => "Biotech",
        CleanTech => "CleanTech",
        EdTech => "EdTech",
        FoodTech => "FoodTech",
    }
}

define_tags! {
    /// Funding stages an investor prefers.
    InvestmentStage, "investment stage" {
        PreSeed => "Pre-Seed",
        Seed => "Seed",
        SeriesA => "Series A",
        SeriesB => "Series B",
        SeriesCPlus => "Series C+",
        Growth => "Growth",
    }
}

define_tags! {
    /// Stage a startup is currently at.
    StartupStage, "startup stage" {
        Idea => "Idea",
        PreSeed => "Pre-Seed",
        Seed => "Seed",
        SeriesA => "Series A",
        SeriesB => "Series B",
        SeriesCPlus => "Series C+",
        Growth => "Growth",
    }
}

define_tags! {
    /// Industry a startup operates in.
    Industry, "industry" {
        Technology => "Technology",
        Healthcare => "Healthcare",
        Fintech => "Fintech",
        ECommerce => "E-commerce",
        AiMl => "AI/ML",
        SaaS => "SaaS",
        Biotech => "Biotech",
        CleanTech => "CleanTech",
        EdTech => "EdTech",
        FoodTech => "FoodTech",
        Other => "Other",
    }
}

define_tags! {
    /// How a startup makes money.
    BusinessModel, "business model" {
        B2B => "B2B",
        B2C => "B2C",
        B2B2C => "B2B2C",
        Marketplace => "Marketplace",
        SaaS => "SaaS",
        Subscription => "Subscription",
        Freemium => "Freemium",
        Other => "Other",
    }
}

impl From<Sector> for Industry {
    fn from(sector: Sector) -> Self {
        match sector {
            Sector::Technology => Self::Technology,
            Sector::Healthcare => Self::Healthcare,
            Sector::Fintech => Self::Fintech,
            Sector::ECommerce => Self::ECommerce,
            Sector::AiMl => Self::AiMl,
            Sector::SaaS => Self::SaaS,
            Sector::Biotech => Self::Biotech,
            Sector::CleanTech => Self::CleanTech,
            Sector::EdTech => Self::EdTech,
            Sector::FoodTech => Self::FoodTech,
        }
    }
}

impl From<InvestmentStage> for StartupStage {
    fn from(stage: InvestmentStage) -> Self {
        match stage {
            InvestmentStage::PreSeed => Self::PreSeed,
            InvestmentStage::Seed => Self::Seed,
            InvestmentStage::SeriesA => Self::SeriesA,
            InvestmentStage::SeriesB => Self::SeriesB,
            InvestmentStage::SeriesCPlus => Self::SeriesCPlus,
            InvestmentStage::Growth => Self::Growth,
        }
    }
}
