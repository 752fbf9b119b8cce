//! Field-level validation failures.

use serde::Serialize;
use thiserror::Error;

use crate::values::MAX_PRODUCT_NAME_LEN;

/// A product attribute, named as it appears on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "productName")]
    ProductName,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "stock")]
    Stock,
    #[serde(rename = "SKU")]
    Sku,
    #[serde(rename = "tags")]
    Tags,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ProductName => "productName",
            Field::Price => "price",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::Sku => "SKU",
            Field::Tags => "tags",
        }
    }

    /// Name used at the start of a message.
    fn label(self) -> &'static str {
        match self {
            Field::ProductName => "Product name",
            Field::Price => "Price",
            Field::Category => "Category",
            Field::Stock => "Stock",
            Field::Sku => "SKU",
            Field::Tags => "Tags",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::ProductName => "Product name is required",
            Field::Price => "Price is required",
            Field::Category => "Category is required",
            Field::Stock => "Stock quantity is required",
            Field::Sku => "SKU is required",
            Field::Tags => "Tags are required",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule failure on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingField(Field),
    LengthExceeded(Field),
    OutOfRange(Field),
    /// Above the largest value the field can hold.
    ExceedsMaximum { field: Field, max: String },
    InvalidEnum { field: Field, value: String },
    TypeMismatch(Field),
    FormatMismatch { field: Field, value: String },
    UniquenessViolation { field: Field, value: String },
    DuplicateValue(Field),
    /// The uniqueness lookup itself failed; the record is rejected.
    LookupFailed { field: Field, reason: String },
}

impl Violation {
    pub fn field(&self) -> Field {
        match self {
            Violation::MissingField(field)
            | Violation::LengthExceeded(field)
            | Violation::OutOfRange(field)
            | Violation::TypeMismatch(field)
            | Violation::DuplicateValue(field) => *field,
            Violation::InvalidEnum { field, .. }
            | Violation::ExceedsMaximum { field, .. }
            | Violation::FormatMismatch { field, .. }
            | Violation::UniquenessViolation { field, .. }
            | Violation::LookupFailed { field, .. } => *field,
        }
    }

    /// Human-readable message, suitable for showing to the person who
    /// submitted the record.
    pub fn message(&self) -> String {
        match self {
            Violation::MissingField(field) => field.required_message().to_string(),
            Violation::LengthExceeded(field) => {
                format!("{} cannot exceed {MAX_PRODUCT_NAME_LEN} characters", field.label())
            }
            Violation::OutOfRange(Field::Price) => "Price must be a positive number".to_string(),
            Violation::OutOfRange(Field::Stock) => "Stock cannot be negative".to_string(),
            Violation::OutOfRange(field) => format!("{} is out of range", field.label()),
            Violation::ExceedsMaximum { field, max } => {
                format!("{} cannot exceed {max}", field.label())
            }
            Violation::InvalidEnum { field, value } => format!("{value} is not a valid {field}"),
            Violation::TypeMismatch(Field::Stock) => "Stock must be an integer".to_string(),
            Violation::TypeMismatch(Field::Price) => "Price must be a positive number".to_string(),
            Violation::TypeMismatch(Field::Tags) => "Tags must be an array of strings".to_string(),
            Violation::TypeMismatch(field) => format!("{} must be a string", field.label()),
            Violation::FormatMismatch { field: Field::Tags, .. } => {
                "Tags must be non-empty and contain only alphanumeric characters".to_string()
            }
            Violation::FormatMismatch { field: Field::Sku, value } => {
                format!("{value} is not a valid SKU! Format should be PROD-XXXX")
            }
            Violation::FormatMismatch { field, value } => {
                format!("{value} is not a valid {}", field.label())
            }
            Violation::UniquenessViolation { field, value } => {
                format!("{field} {value} already exists")
            }
            Violation::DuplicateValue(field) => format!("Duplicate {field} are not allowed"),
            Violation::LookupFailed { field, .. } => {
                format!("{field} uniqueness could not be verified")
            }
        }
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field(), self.message())
    }
}

/// `(field, message)` pair for surfacing a rejection to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: Field,
    pub message: String,
}

/// Rejection of a candidate product: every rule that failed, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Product validation failed: {}", join(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Fields that failed at least one rule, without repeats.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field()) {
                fields.push(v.field());
            }
        }
        fields
    }

    pub fn to_report(&self) -> Vec<FieldReport> {
        self.violations
            .iter()
            .map(|v| FieldReport {
                field: v.field(),
                message: v.message(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_the_field_templates() {
        assert_eq!(
            Violation::MissingField(Field::Stock).message(),
            "Stock quantity is required"
        );
        assert_eq!(
            Violation::OutOfRange(Field::Price).message(),
            "Price must be a positive number"
        );
        assert_eq!(
            Violation::OutOfRange(Field::Stock).message(),
            "Stock cannot be negative"
        );
        assert_eq!(
            Violation::InvalidEnum {
                field: Field::Category,
                value: "Toys".to_string()
            }
            .message(),
            "Toys is not a valid category"
        );
        assert_eq!(
            Violation::FormatMismatch {
                field: Field::Sku,
                value: "PROD-12".to_string()
            }
            .message(),
            "PROD-12 is not a valid SKU! Format should be PROD-XXXX"
        );
        assert_eq!(
            Violation::FormatMismatch {
                field: Field::Tags,
                value: "a b".to_string()
            }
            .message(),
            "Tags must be non-empty and contain only alphanumeric characters"
        );
        assert_eq!(
            Violation::UniquenessViolation {
                field: Field::Sku,
                value: "PROD-AB12".to_string()
            }
            .message(),
            "SKU PROD-AB12 already exists"
        );
    }

    #[test]
    fn range_and_type_messages_depend_on_the_field() {
        assert_eq!(
            Violation::OutOfRange(Field::ProductName).message(),
            "Product name is out of range"
        );
        assert_eq!(
            Violation::ExceedsMaximum {
                field: Field::Stock,
                max: u64::MAX.to_string()
            }
            .message(),
            "Stock cannot exceed 18446744073709551615"
        );
        assert_eq!(
            Violation::TypeMismatch(Field::Category).message(),
            "Category must be a string"
        );
        assert_eq!(
            Violation::TypeMismatch(Field::Tags).message(),
            "Tags must be an array of strings"
        );
    }

    #[test]
    fn display_lists_every_violation() {
        let errors = ValidationErrors::new(vec![
            Violation::LengthExceeded(Field::ProductName),
            Violation::DuplicateValue(Field::Tags),
        ]);

        assert_eq!(
            errors.to_string(),
            "Product validation failed: productName: Product name cannot exceed 50 characters, \
             tags: Duplicate tags are not allowed"
        );
    }

    #[test]
    fn fields_are_reported_once() {
        let errors = ValidationErrors::new(vec![
            Violation::OutOfRange(Field::Stock),
            Violation::TypeMismatch(Field::Stock),
            Violation::MissingField(Field::Price),
        ]);

        assert_eq!(errors.fields(), vec![Field::Stock, Field::Price]);
    }

    #[test]
    fn report_serializes_wire_field_names() {
        let errors = ValidationErrors::new(vec![Violation::MissingField(Field::Sku)]);
        let json = serde_json::to_value(errors.to_report()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "field": "SKU", "message": "SKU is required" }])
        );
    }
}
