use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::fnutil::{get_field, Lookup, LookupError};

// ---------------------------------------------------------------------------
// FieldValue – a single field of an inventory record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value mirroring the JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Array of objects, e.g. the batters of an item.
    List(Vec<Record>),
    /// Any other array (scalars, or objects mixed with scalars).
    Array(Vec<FieldValue>),
    /// A nested object.
    Record(Record),
    Null,
}

impl FieldValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            FieldValue::List(records) => Some(records),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::List(_) => "list",
            FieldValue::Array(_) => "array",
            FieldValue::Record(_) => "record",
            FieldValue::Null => "null",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::List(records) => write!(f, "<{} records>", records.len()),
            FieldValue::Array(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            FieldValue::Record(record) => write!(f, "<record with {} fields>", record.fields.len()),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(records: Vec<Record>) -> Self {
        FieldValue::List(records)
    }
}

// ---------------------------------------------------------------------------
// FieldError – why a typed field access failed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field '{field}' not found")]
    Missing { field: String },
    #[error("field '{field}' is {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl From<LookupError> for FieldError {
    fn from(err: LookupError) -> Self {
        FieldError::Missing { field: err.field }
    }
}

// ---------------------------------------------------------------------------
// Record – one inventory item (or nested sub-record)
// ---------------------------------------------------------------------------

/// One record of the inventory: field name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Lookup for Record {
    type Value = FieldValue;

    fn lookup(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when assembling records by hand.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn str_field(&self, field: &str) -> Result<&str, FieldError> {
        let value = get_field(field, self)?;
        value.as_str().ok_or_else(|| wrong_type(field, "string", value))
    }

    /// Equality test against a string: a missing field is an error, a
    /// non-string value simply does not match.
    pub fn field_equals(&self, field: &str, expected: &str) -> Result<bool, FieldError> {
        Ok(get_field(field, self)?.as_str() == Some(expected))
    }

    pub fn f64_field(&self, field: &str) -> Result<f64, FieldError> {
        let value = get_field(field, self)?;
        value.as_f64().ok_or_else(|| wrong_type(field, "number", value))
    }

    pub fn records_field(&self, field: &str) -> Result<&[Record], FieldError> {
        let value = get_field(field, self)?;
        value.as_records().ok_or_else(|| wrong_type(field, "list", value))
    }

    pub fn id(&self) -> Result<&str, FieldError> {
        self.str_field("id")
    }

    pub fn name(&self) -> Result<&str, FieldError> {
        self.str_field("name")
    }

    /// The `type` field (`type` is reserved in Rust).
    pub fn kind(&self) -> Result<&str, FieldError> {
        self.str_field("type")
    }

    /// Price per unit.
    pub fn ppu(&self) -> Result<f64, FieldError> {
        self.f64_field("ppu")
    }

    pub fn batters(&self) -> Result<&[Record], FieldError> {
        self.records_field("batters")
    }
}

fn wrong_type(field: &str, expected: &'static str, value: &FieldValue) -> FieldError {
    FieldError::WrongType {
        field: field.to_string(),
        expected,
        found: value.kind(),
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded document
// ---------------------------------------------------------------------------

/// The loaded inventory: price threshold plus items in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub price_thresh_now: f64,
    pub items: Vec<Record>,
}

impl Dataset {
    pub fn new(price_thresh_now: f64, items: Vec<Record>) -> Self {
        Dataset {
            price_thresh_now,
            items,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the dataset has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cake() -> Record {
        Record::new()
            .with("id", "0001")
            .with("name", "Cake")
            .with("type", "cake")
            .with("ppu", 0.55)
    }

    #[test]
    fn typed_accessors_read_fields() {
        let item = cake();
        assert_eq!(item.id(), Ok("0001"));
        assert_eq!(item.name(), Ok("Cake"));
        assert_eq!(item.kind(), Ok("cake"));
        assert_eq!(item.ppu(), Ok(0.55));
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = cake().batters().unwrap_err();
        assert_eq!(
            err,
            FieldError::Missing {
                field: "batters".to_string()
            }
        );
    }

    #[test]
    fn wrong_type_names_both_kinds() {
        let item = cake().with("ppu", "cheap");
        let err = item.ppu().unwrap_err();
        assert_eq!(err.to_string(), "field 'ppu' is string, expected number");
    }

    #[test]
    fn integer_price_reads_as_f64() {
        let item = cake().with("ppu", 1_i64);
        assert_eq!(item.ppu(), Ok(1.0));
    }

    #[test]
    fn get_field_on_record() {
        let item = cake();
        assert_eq!(get_field("ppu", &item), Ok(&FieldValue::Float(0.55)));
        assert!(get_field("topping", &item).is_err());
    }

    #[test]
    fn record_from_pairs() {
        let batter: Record = [("id", "1002"), ("type", "Chocolate")].into_iter().collect();
        assert_eq!(batter.id(), Ok("1002"));
        assert_eq!(batter.kind(), Ok("Chocolate"));
    }

    #[test]
    fn field_equals_treats_other_types_as_no_match() {
        let item = cake().with("type", 7_i64);
        assert_eq!(item.field_equals("type", "cake"), Ok(false));
        assert_eq!(item.field_equals("name", "Cake"), Ok(true));
        assert_eq!(
            item.field_equals("topping", "Glazed"),
            Err(FieldError::Missing {
                field: "topping".to_string()
            })
        );
    }

    #[test]
    fn records_field_rejects_scalar_array_only_when_read() {
        let item = cake().with(
            "batters",
            FieldValue::Array(vec![FieldValue::from("chocolate")]),
        );
        assert_eq!(item.name(), Ok("Cake"));
        assert_eq!(
            item.batters(),
            Err(FieldError::WrongType {
                field: "batters".to_string(),
                expected: "list",
                found: "array",
            })
        );
    }

    #[test]
    fn display_field_values() {
        assert_eq!(FieldValue::from("Cake").to_string(), "Cake");
        assert_eq!(FieldValue::from(1_i64).to_string(), "1");
        assert_eq!(
            FieldValue::Array(vec![FieldValue::from("vegan"), FieldValue::Bool(true)]).to_string(),
            "[vegan, true]"
        );
        assert_eq!(FieldValue::Null.to_string(), "<null>");
        assert_eq!(
            FieldValue::from(vec![Record::new(), Record::new()]).to_string(),
            "<2 records>"
        );
    }
}
