//! Validated product attributes.
//!
//! Each type here can only be built through its `parse` constructor, which
//! applies that attribute's rules and reports failures as [`Violation`]s.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use catalog_core::ValueObject;

use crate::violation::{Field, Violation};

/// Maximum length of a product name, counted in characters after trimming.
pub const MAX_PRODUCT_NAME_LEN: usize = 50;

/// SKU format: `PROD-` followed by exactly four ASCII alphanumerics.
pub const SKU_PATTERN: &str = r"^PROD-[A-Za-z0-9]{4}$";

static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SKU_PATTERN).expect("valid regex"));

/// Trimmed, non-empty product name of at most 50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Violation::MissingField(Field::ProductName));
        }
        if trimmed.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(Violation::LengthExceeded(Field::ProductName));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ProductName {}

/// Strictly positive, finite price.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn parse(raw: f64) -> Result<Self, Violation> {
        if raw.is_finite() && raw > 0.0 {
            Ok(Self(raw))
        } else {
            Err(Violation::OutOfRange(Field::Price))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

/// Closed set of product categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home Appliances")]
    HomeAppliances,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::HomeAppliances,
    ];

    /// Case-sensitive match against the category labels.
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == raw)
            .ok_or_else(|| Violation::InvalidEnum {
                field: Field::Category,
                value: raw.to_string(),
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::HomeAppliances => "Home Appliances",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueObject for Category {}

/// Non-negative whole stock quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Stock(u64);

impl Stock {
    /// Accepts any JSON number that is a non-negative whole value, including
    /// whole floats such as `10.0`.
    ///
    /// A negative fraction (e.g. `-2.5`) fails both rules and reports both.
    pub fn parse(raw: &Number) -> Result<Self, Vec<Violation>> {
        if let Some(n) = raw.as_u64() {
            return Ok(Self(n));
        }
        if raw.as_i64().is_some() {
            return Err(vec![Violation::OutOfRange(Field::Stock)]);
        }

        let value = raw.as_f64().unwrap_or(f64::NAN);
        let mut violations = Vec::new();
        if value < 0.0 {
            violations.push(Violation::OutOfRange(Field::Stock));
        }
        if !value.is_finite() || value.fract() != 0.0 {
            violations.push(Violation::TypeMismatch(Field::Stock));
        } else if value >= 0.0 && value < u64::MAX as f64 {
            return Ok(Self(value as u64));
        } else if value >= 0.0 {
            violations.push(Violation::ExceedsMaximum {
                field: Field::Stock,
                max: u64::MAX.to_string(),
            });
        }
        Err(violations)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl ValueObject for Stock {}

/// Stock keeping unit in the `PROD-XXXX` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        if SKU_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Violation::FormatMismatch {
                field: Field::Sku,
                value: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for Sku {}

/// Non-empty, ASCII-alphanumeric tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        // Surrounding whitespace is a non-alphanumeric character, so the
        // untrimmed value must pass too.
        if raw.trim().is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Violation::FormatMismatch {
                field: Field::Tags,
                value: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Tag {}

/// Ordered tag list with no repeated elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Checks every element, then the list as a whole. Each malformed element
    /// is reported separately; repeats are reported once.
    pub fn parse(raw: &[String]) -> Result<Self, Vec<Violation>> {
        let mut tags = Vec::with_capacity(raw.len());
        let mut violations = Vec::new();

        for element in raw {
            match Tag::parse(element) {
                Ok(tag) => tags.push(tag),
                Err(v) => violations.push(v),
            }
        }

        let distinct: HashSet<&str> = raw.iter().map(String::as_str).collect();
        if distinct.len() != raw.len() {
            violations.push(Violation::DuplicateValue(Field::Tags));
        }

        if violations.is_empty() {
            Ok(Self(tags))
        } else {
            Err(violations)
        }
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for Tags {}
