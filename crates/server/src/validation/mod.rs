//! Request validation.
//!
//! Incoming bodies are validated as raw JSON objects rather than
//! deserialized straight into profile types: every field is checked and
//! every violation collected before a single one is reported. Values are
//! coerced the way a form would send them (numbers as JSON numbers or
//! numeric strings, booleans as `true`/`"true"`/`"1"` and friends).
//!
//! Blank strings are removed with [`clean_payload`] first, so a field sent
//! as `"   "` is treated exactly like one that was never sent.

pub mod investor;
pub mod startup;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use onboarding_core::schema::{
    AmountRule, ChoiceRule, FormatRule, IntRule, TextRule, is_valid_phone, is_valid_url,
};
use onboarding_core::{Email, Payload, Tag, ValidationErrors, clean_payload};

pub use investor::validate_investor;
pub use startup::validate_startup;

/// Reads fields out of a cleaned payload, recording a violation for every
/// field that fails its rule.
///
/// Each reader returns `None` both when an optional field is absent and when
/// a field failed (in which case an error was recorded); callers build the
/// record only once [`FieldReader::finish`] reports no errors.
pub(crate) struct FieldReader {
    payload: Payload,
    errors: ValidationErrors,
}

impl FieldReader {
    pub(crate) fn new(raw: &Payload) -> Self {
        Self {
            payload: clean_payload(raw),
            errors: ValidationErrors::new(),
        }
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field).filter(|v| !v.is_null())
    }

    /// Record a violation that is not tied to a single reader.
    pub(crate) fn reject(&mut self, field: &str, message: &str) {
        self.errors.push(field, message);
    }

    /// `true` when `field` already has a recorded violation.
    pub(crate) fn has_error(&self, field: &str) -> bool {
        self.errors.has_field(field)
    }

    pub(crate) fn finish(self) -> ValidationErrors {
        self.errors
    }

    /// A required free-text field, trimmed.
    pub(crate) fn required_text(&mut self, rule: &TextRule) -> Option<String> {
        let text = self.text(rule);
        if text.is_none() && !self.has_error(rule.field) {
            self.reject(rule.field, rule.message);
        }
        text
    }

    /// An optional free-text field, trimmed.
    pub(crate) fn text(&mut self, rule: &TextRule) -> Option<String> {
        let accepted = self
            .get(rule.field)?
            .as_str()
            .map(str::trim)
            .filter(|s| rule.accepts(s))
            .map(str::to_owned);
        if accepted.is_none() {
            self.reject(rule.field, rule.message);
        }
        accepted
    }

    /// A required email address, normalized.
    pub(crate) fn email(&mut self, rule: &FormatRule) -> Option<Email> {
        let parsed = self
            .get(rule.field)
            .and_then(Value::as_str)
            .and_then(|s| Email::parse(s).ok());
        if parsed.is_none() {
            self.reject(rule.field, rule.message);
        }
        parsed
    }

    /// An optional phone number.
    pub(crate) fn phone(&mut self, rule: &FormatRule) -> Option<String> {
        self.formatted(rule, is_valid_phone)
    }

    /// An optional http(s) URL.
    pub(crate) fn url(&mut self, rule: &FormatRule) -> Option<String> {
        self.formatted(rule, is_valid_url)
    }

    fn formatted(&mut self, rule: &FormatRule, check: fn(&str) -> bool) -> Option<String> {
        let accepted = self
            .get(rule.field)?
            .as_str()
            .map(str::trim)
            .filter(|s| s.chars().count() <= rule.max && check(s))
            .map(str::to_owned);
        if accepted.is_none() {
            self.reject(rule.field, rule.message);
        }
        accepted
    }

    /// A required non-negative amount.
    pub(crate) fn required_amount(&mut self, rule: &AmountRule) -> Option<Decimal> {
        let amount = self.amount(rule);
        if amount.is_none() && !self.has_error(rule.field) {
            self.reject(rule.field, rule.message);
        }
        amount
    }

    /// An optional non-negative amount.
    pub(crate) fn amount(&mut self, rule: &AmountRule) -> Option<Decimal> {
        let accepted = coerce_decimal(self.get(rule.field)?)
            .filter(|n| *n >= Decimal::ZERO)
            .map(|n| n.normalize());
        if accepted.is_none() {
            self.reject(rule.field, rule.message);
        }
        accepted
    }

    /// An optional bounded integer.
    pub(crate) fn integer(&mut self, rule: &IntRule) -> Option<i32> {
        let value = self.get(rule.field)?;
        let parsed = coerce_integer(value)
            .filter(|n| rule.accepts(*n))
            .and_then(|n| i32::try_from(n).ok());
        if parsed.is_none() {
            self.reject(rule.field, rule.message);
        }
        parsed
    }

    /// An optional boolean.
    pub(crate) fn boolean(&mut self, rule: &ChoiceRule) -> Option<bool> {
        let value = self.get(rule.field)?;
        let parsed = coerce_bool(value);
        if parsed.is_none() {
            self.reject(rule.field, rule.message);
        }
        parsed
    }

    /// A required member of tag set `T`.
    pub(crate) fn required_choice<T: Tag>(&mut self, rule: &ChoiceRule) -> Option<T> {
        let choice = self.choice(rule);
        if choice.is_none() && !self.has_error(rule.field) {
            self.reject(rule.field, rule.message);
        }
        choice
    }

    /// An optional member of tag set `T`.
    pub(crate) fn choice<T: Tag>(&mut self, rule: &ChoiceRule) -> Option<T> {
        let value = self.get(rule.field)?;
        let parsed = value.as_str().and_then(|s| T::parse(s).ok());
        if parsed.is_none() {
            self.reject(rule.field, rule.message);
        }
        parsed
    }

    /// A non-empty list of tag set `T` members. Duplicates collapse, keeping
    /// first-seen order.
    pub(crate) fn tag_list<T: Tag + PartialEq>(
        &mut self,
        rule: &ChoiceRule,
        member_message: &str,
    ) -> Option<Vec<T>> {
        let parsed: Option<Option<Vec<T>>> = self
            .get(rule.field)
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().and_then(|s| T::parse(s).ok()))
                    .collect()
            });

        match parsed {
            None => {
                self.reject(rule.field, rule.message);
                None
            }
            Some(None) => {
                self.reject(rule.field, member_message);
                None
            }
            Some(Some(all)) => {
                let mut tags: Vec<T> = Vec::with_capacity(all.len());
                for tag in all {
                    if !tags.contains(&tag) {
                        tags.push(tag);
                    }
                }
                Some(tags)
            }
        }
    }
}

/// A JSON number or numeric string as a decimal.
fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// A JSON integer, whole float, or integer string.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A float with no fractional part, e.g. `12.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)] // Checked whole and in range
fn whole_number(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < 1e15).then_some(f as i64)
}

/// `true`/`false`, the strings `"true"`, `"false"`, `"1"`, `"0"`, or the numbers 1 and 0.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
