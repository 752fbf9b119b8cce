use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

use catalog_core::{DocumentId, DomainResult, Entity};

use crate::lookup::SkuLookup;
use crate::values::{Category, Price, ProductName, Sku, Stock, Tags};
use crate::violation::{Field, ValidationErrors, Violation};

/// Product identifier (the stored document's id).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub DocumentId);

impl ProductId {
    pub fn new() -> Self {
        Self(DocumentId::new())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = catalog_core::DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Ok(Self(s.parse()?))
    }
}

/// A field as received: the expected JSON type, or whatever was sent instead.
///
/// Keeps a wrong-typed value around so validation can report it against its
/// field rather than failing the whole record at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput<T> {
    Value(T),
    WrongType(JsonValue),
}

impl<T> From<T> for FieldInput<T> {
    fn from(value: T) -> Self {
        FieldInput::Value(value)
    }
}

impl From<&str> for FieldInput<String> {
    fn from(value: &str) -> Self {
        FieldInput::Value(value.to_string())
    }
}

/// Candidate product record as supplied by caller code.
///
/// Every field is optional so that absence can be reported as a violation
/// instead of a deserialization failure. `null` is treated as absent, and an
/// absent `tags` is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub product_name: Option<FieldInput<String>>,
    pub price: Option<FieldInput<f64>>,
    pub category: Option<FieldInput<String>>,
    pub stock: Option<FieldInput<Number>>,
    #[serde(rename = "SKU")]
    pub sku: Option<FieldInput<String>>,
    pub tags: Option<FieldInput<Vec<String>>>,
}

/// A product that passed every rule. Only obtainable through validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "_id")]
    id: ProductId,
    #[serde(rename = "productName")]
    product_name: ProductName,
    price: Price,
    category: Category,
    stock: Stock,
    #[serde(rename = "SKU")]
    sku: Sku,
    tags: Tags,
}

impl Product {
    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn product_name(&self) -> &ProductName {
        &self.product_name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Keeps the value on success, records the failure otherwise.
fn collect<T>(result: Result<T, Violation>, violations: &mut Vec<Violation>) -> Option<T> {
    result.map_err(|v| violations.push(v)).ok()
}

fn collect_all<T>(result: Result<T, Vec<Violation>>, violations: &mut Vec<Violation>) -> Option<T> {
    result.map_err(|vs| violations.extend(vs)).ok()
}

/// Text field presence and type. The document store treats an empty string
/// as a missing value.
fn text<'a>(
    raw: &'a Option<FieldInput<String>>,
    field: Field,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    match raw {
        Some(FieldInput::Value(s)) if !s.is_empty() => Some(s.as_str()),
        Some(FieldInput::WrongType(_)) => {
            violations.push(Violation::TypeMismatch(field));
            None
        }
        _ => {
            violations.push(Violation::MissingField(field));
            None
        }
    }
}

/// Tags sent as an array with non-string elements: each such element is
/// malformed; the string elements still go through the tag rules.
fn mixed_tags(items: &[JsonValue], violations: &mut Vec<Violation>) {
    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            JsonValue::String(s) => strings.push(s.clone()),
            other => violations.push(Violation::FormatMismatch {
                field: Field::Tags,
                value: other.to_string(),
            }),
        }
    }
    if let Err(vs) = Tags::parse(&strings) {
        violations.extend(vs);
    }
}

impl ProductDraft {
    /// Validate under a freshly generated id.
    pub fn validate<L>(&self, lookup: &L) -> Result<Product, ValidationErrors>
    where
        L: SkuLookup + ?Sized,
    {
        self.validate_as(ProductId::new(), lookup)
    }

    /// Run every rule and collect all failures; any failure rejects the record.
    ///
    /// The uniqueness lookup is only consulted for a well-formed SKU.
    pub fn validate_as<L>(&self, id: ProductId, lookup: &L) -> Result<Product, ValidationErrors>
    where
        L: SkuLookup + ?Sized,
    {
        let mut violations = Vec::new();

        let product_name = text(&self.product_name, Field::ProductName, &mut violations)
            .and_then(|raw| collect(ProductName::parse(raw), &mut violations));

        let price = match &self.price {
            Some(FieldInput::Value(raw)) => collect(Price::parse(*raw), &mut violations),
            Some(FieldInput::WrongType(_)) => {
                violations.push(Violation::OutOfRange(Field::Price));
                None
            }
            None => {
                violations.push(Violation::MissingField(Field::Price));
                None
            }
        };

        let category = text(&self.category, Field::Category, &mut violations)
            .and_then(|raw| collect(Category::parse(raw), &mut violations));

        let stock = match &self.stock {
            Some(FieldInput::Value(raw)) => collect_all(Stock::parse(raw), &mut violations),
            Some(FieldInput::WrongType(_)) => {
                violations.push(Violation::TypeMismatch(Field::Stock));
                None
            }
            None => {
                violations.push(Violation::MissingField(Field::Stock));
                None
            }
        };

        let sku = text(&self.sku, Field::Sku, &mut violations)
            .and_then(|raw| collect(Sku::parse(raw), &mut violations));

        if let Some(sku) = &sku {
            match lookup.sku_exists(sku) {
                Ok(false) => {}
                Ok(true) => violations.push(Violation::UniquenessViolation {
                    field: Field::Sku,
                    value: sku.to_string(),
                }),
                Err(e) => violations.push(Violation::LookupFailed {
                    field: Field::Sku,
                    reason: e.to_string(),
                }),
            }
        }

        let tags = match &self.tags {
            None => Some(Tags::default()),
            Some(FieldInput::Value(raw)) => collect_all(Tags::parse(raw), &mut violations),
            Some(FieldInput::WrongType(JsonValue::Array(items))) => {
                mixed_tags(items, &mut violations);
                None
            }
            Some(FieldInput::WrongType(_)) => {
                violations.push(Violation::TypeMismatch(Field::Tags));
                None
            }
        };

        match (product_name, price, category, stock, sku, tags) {
            (Some(product_name), Some(price), Some(category), Some(stock), Some(sku), Some(tags))
                if violations.is_empty() =>
            {
                Ok(Product {
                    id,
                    product_name,
                    price,
                    category,
                    stock,
                    sku,
                    tags,
                })
            }
            _ => Err(ValidationErrors::new(violations)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::lookup::LookupError;

    struct FailingLookup;

    impl SkuLookup for FailingLookup {
        fn sku_exists(&self, _sku: &Sku) -> Result<bool, LookupError> {
            Err(LookupError("index unavailable".to_string()))
        }
    }

    fn no_skus() -> HashSet<Sku> {
        HashSet::new()
    }

    fn widget() -> ProductDraft {
        ProductDraft {
            product_name: Some("Widget".into()),
            price: Some(9.99.into()),
            category: Some("Electronics".into()),
            stock: Some(Number::from(10u64).into()),
            sku: Some("PROD-AB12".into()),
            tags: Some(vec!["new".to_string(), "sale".to_string()].into()),
        }
    }

    #[test]
    fn valid_record_is_accepted() {
        let product = widget().validate(&no_skus()).unwrap();

        assert_eq!(product.product_name().as_str(), "Widget");
        assert_eq!(product.price().value(), 9.99);
        assert_eq!(product.category(), Category::Electronics);
        assert_eq!(product.stock().value(), 10);
        assert_eq!(product.sku().as_str(), "PROD-AB12");
        assert_eq!(product.tags().len(), 2);
    }

    #[test]
    fn validate_as_keeps_the_given_id() {
        let id = ProductId::new();
        let product = widget().validate_as(id, &no_skus()).unwrap();
        assert_eq!(*product.id(), id);
    }

    #[test]
    fn product_id_parses_from_display_form() {
        let id = ProductId::new();
        assert_eq!(id.to_string().parse::<ProductId>().unwrap(), id);
        assert!("PROD-AB12".parse::<ProductId>().is_err());
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let errs = ProductDraft::default().validate(&no_skus()).unwrap_err();

        assert_eq!(
            errs.violations(),
            &[
                Violation::MissingField(Field::ProductName),
                Violation::MissingField(Field::Price),
                Violation::MissingField(Field::Category),
                Violation::MissingField(Field::Stock),
                Violation::MissingField(Field::Sku),
            ]
        );
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let draft = ProductDraft {
            category: Some("".into()),
            sku: Some("".into()),
            ..widget()
        };
        let errs = draft.validate(&no_skus()).unwrap_err();

        assert_eq!(
            errs.violations(),
            &[
                Violation::MissingField(Field::Category),
                Violation::MissingField(Field::Sku),
            ]
        );
    }

    #[test]
    fn tags_are_optional() {
        let draft = ProductDraft {
            tags: None,
            ..widget()
        };
        assert!(draft.validate(&no_skus()).is_ok());
    }

    #[test]
    fn all_failures_are_collected() {
        let draft = ProductDraft {
            product_name: Some("x".repeat(60).into()),
            price: Some(0.0.into()),
            category: Some("Toys".into()),
            stock: Some(Number::from(-1i64).into()),
            sku: Some("prod-AB12".into()),
            tags: Some(vec!["red".to_string(), "red".to_string()].into()),
        };
        let errs = draft.validate(&no_skus()).unwrap_err();

        assert_eq!(
            errs.fields(),
            vec![
                Field::ProductName,
                Field::Price,
                Field::Category,
                Field::Stock,
                Field::Sku,
                Field::Tags,
            ]
        );
    }

    #[test]
    fn stock_rules() {
        let reject = |stock: Number| {
            ProductDraft {
                stock: Some(stock.into()),
                ..widget()
            }
            .validate(&no_skus())
        };

        assert!(
            reject(Number::from(-1i64))
                .unwrap_err()
                .contains(&Violation::OutOfRange(Field::Stock))
        );
        assert!(
            reject(Number::from_f64(2.5).unwrap())
                .unwrap_err()
                .contains(&Violation::TypeMismatch(Field::Stock))
        );
        assert_eq!(reject(Number::from(0u64)).unwrap().stock().value(), 0);
    }

    #[test]
    fn category_rules() {
        let toys = ProductDraft {
            category: Some("Toys".into()),
            ..widget()
        };
        assert_eq!(
            toys.validate(&no_skus()).unwrap_err().violations(),
            &[Violation::InvalidEnum {
                field: Field::Category,
                value: "Toys".to_string()
            }]
        );

        let books = ProductDraft {
            category: Some("Books".into()),
            ..widget()
        };
        assert_eq!(books.validate(&no_skus()).unwrap().category(), Category::Books);
    }

    #[test]
    fn taken_sku_is_a_uniqueness_violation() {
        let taken: HashSet<Sku> = [Sku::parse("PROD-AB12").unwrap()].into_iter().collect();
        let errs = widget().validate(&taken).unwrap_err();

        assert_eq!(
            errs.violations(),
            &[Violation::UniquenessViolation {
                field: Field::Sku,
                value: "PROD-AB12".to_string()
            }]
        );
    }

    #[test]
    fn malformed_sku_skips_the_lookup() {
        let draft = ProductDraft {
            sku: Some("PROD-AB1!".into()),
            ..widget()
        };
        let errs = draft.validate(&FailingLookup).unwrap_err();

        assert_eq!(
            errs.violations(),
            &[Violation::FormatMismatch {
                field: Field::Sku,
                value: "PROD-AB1!".to_string()
            }]
        );
    }

    #[test]
    fn lookup_failure_rejects_the_record() {
        let errs = widget().validate(&FailingLookup).unwrap_err();

        assert_eq!(errs.len(), 1);
        assert!(matches!(
            &errs.violations()[0],
            Violation::LookupFailed { field: Field::Sku, .. }
        ));
    }

    #[test]
    fn stored_name_is_trimmed() {
        let draft = ProductDraft {
            product_name: Some("  Widget  ".into()),
            ..widget()
        };
        let product = draft.validate(&no_skus()).unwrap();
        assert_eq!(product.product_name().as_str(), "Widget");
    }

    #[test]
    fn draft_deserializes_wire_names() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "productName": "Widget",
            "price": 9.99,
            "category": "Electronics",
            "stock": 10,
            "SKU": "PROD-AB12",
            "tags": ["new", "sale"]
        }))
        .unwrap();

        assert_eq!(draft, widget());
    }

    #[test]
    fn draft_without_tags_or_with_nulls_deserializes() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "productName": null,
            "price": 1,
            "tags": null,
        }))
        .unwrap();

        assert_eq!(draft.product_name, None);
        assert_eq!(draft.price, Some(FieldInput::Value(1.0)));
        assert_eq!(draft.tags, None);
    }

    #[test]
    fn null_tags_are_an_empty_list() {
        let mut record = serde_json::to_value(widget()).unwrap();
        record["tags"] = serde_json::Value::Null;
        let draft: ProductDraft = serde_json::from_value(record).unwrap();

        assert!(draft.validate(&no_skus()).unwrap().tags().is_empty());
    }

    #[test]
    fn wrong_json_types_become_field_violations() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "productName": 123,
            "price": "cheap",
            "category": ["Books"],
            "stock": "abc",
            "SKU": false,
            "tags": "red"
        }))
        .unwrap();

        assert_eq!(
            draft.product_name,
            Some(FieldInput::WrongType(serde_json::json!(123)))
        );

        let errs = draft.validate(&no_skus()).unwrap_err();
        assert_eq!(
            errs.violations(),
            &[
                Violation::TypeMismatch(Field::ProductName),
                Violation::OutOfRange(Field::Price),
                Violation::TypeMismatch(Field::Category),
                Violation::TypeMismatch(Field::Stock),
                Violation::TypeMismatch(Field::Sku),
                Violation::TypeMismatch(Field::Tags),
            ]
        );
        assert_eq!(errs.violations()[1].message(), "Price must be a positive number");
        assert_eq!(errs.violations()[3].message(), "Stock must be an integer");
    }

    #[test]
    fn non_string_tags_are_malformed_elements() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "productName": "Widget",
            "price": 9.99,
            "category": "Electronics",
            "stock": 10,
            "SKU": "PROD-AB12",
            "tags": ["red", 7, "red"]
        }))
        .unwrap();

        let errs = draft.validate(&no_skus()).unwrap_err();
        assert_eq!(
            errs.violations(),
            &[
                Violation::FormatMismatch {
                    field: Field::Tags,
                    value: "7".to_string()
                },
                Violation::DuplicateValue(Field::Tags),
            ]
        );
    }

    #[test]
    fn product_serializes_as_document() {
        let id = ProductId::new();
        let product = widget().validate_as(id, &no_skus()).unwrap();
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "_id": id.to_string(),
                "productName": "Widget",
                "price": 9.99,
                "category": "Electronics",
                "stock": 10,
                "SKU": "PROD-AB12",
                "tags": ["new", "sale"]
            })
        );
    }
}
