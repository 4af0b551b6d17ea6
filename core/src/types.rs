//! Wire types for the medicines API.
//!
//! # Design
//! The server is loosely typed: list records can miss fields, carry the
//! wrong JSON type, or not be objects at all. `MedicineList` therefore keeps
//! each record as a raw `serde_json::Value` and `Medicine::from_record`
//! normalizes one record at a time, so a `null` hole can be skipped without
//! rejecting the rest of the response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShapeError;

/// A medicine as the client understands it. Both fields are optional because
/// the server does not guarantee either.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Medicine {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl Medicine {
    /// Normalize one raw list record.
    ///
    /// A `name` that is missing, not a string or blank becomes `None`, and so
    /// does a `price` that is not a JSON number. Scalars and arrays carry no
    /// fields and normalize to the all-`None` medicine. Only `null` is
    /// rejected.
    pub fn from_record(record: &Value) -> Result<Self, ShapeError> {
        let fields = match record {
            Value::Null => return Err(ShapeError { found: "null" }),
            Value::Object(fields) => fields,
            _ => return Ok(Self::default()),
        };
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_owned);
        let price = fields.get("price").and_then(Value::as_f64);
        Ok(Self { name, price })
    }
}

/// The two shapes `GET /medicines` is known to answer with.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Bare(Vec<Value>),
    Envelope {
        #[serde(default)]
        medicines: Option<Vec<Value>>,
    },
}

/// Ordered raw records from `GET /medicines`.
///
/// Deserializes from either a bare array or a `{ "medicines": [...] }`
/// envelope. An envelope without a `medicines` array (missing or `null`)
/// yields an empty list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "ListPayload")]
pub struct MedicineList {
    records: Vec<Value>,
}

impl From<ListPayload> for MedicineList {
    fn from(payload: ListPayload) -> Self {
        let records = match payload {
            ListPayload::Bare(records) => records,
            ListPayload::Envelope { medicines } => medicines.unwrap_or_default(),
        };
        Self { records }
    }
}

impl MedicineList {
    pub fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Response of `GET /average-price`.
///
/// `average` is `None` when the server found no numerically priced items;
/// `count` carries no price information in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    #[serde(rename = "average_price", default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: u64,
}

/// Free-form status payload returned by the mutation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    /// Text shown to the user: `message`, else `error`, else `"Done."`.
    /// Empty strings count as absent.
    pub fn display_text(&self) -> &str {
        [&self.message, &self.error]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or("Done.")
    }
}

/// Field values captured from a form, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Typed payload for `POST /create`.
///
/// The page submits whatever the form holds, so creation goes through
/// `FormData`; this converts a typed record into that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub price: f64,
}

impl NewMedicine {
    pub fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", self.name.as_str())
            .with("price", self.price.to_string())
    }
}

/// Payload for `POST /update`: replaces the price of the named medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineUpdate {
    pub name: String,
    pub price: f64,
}

/// Payload for `DELETE /delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRemoval {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_accepts_bare_array() {
        let list: MedicineList = serde_json::from_str(r#"[{"name":"Aspirin","price":5}]"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.records()[0]["name"], "Aspirin");
    }

    #[test]
    fn list_accepts_envelope() {
        let list: MedicineList =
            serde_json::from_str(r#"{"medicines":[{"name":"A"},{"name":"B"}]}"#).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn envelope_without_medicines_is_empty() {
        let list: MedicineList = serde_json::from_str(r#"{"medicines":null}"#).unwrap();
        assert!(list.is_empty());
        let list: MedicineList = serde_json::from_str(r#"{"unrelated":1}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn list_rejects_scalars_and_non_array_envelopes() {
        assert!(serde_json::from_str::<MedicineList>("null").is_err());
        assert!(serde_json::from_str::<MedicineList>("42").is_err());
        assert!(serde_json::from_str::<MedicineList>(r#"{"medicines":"abc"}"#).is_err());
    }

    #[test]
    fn medicine_from_well_formed_record() {
        let med = Medicine::from_record(&json!({"name": "Aspirin", "price": 5})).unwrap();
        assert_eq!(med.name.as_deref(), Some("Aspirin"));
        assert_eq!(med.price, Some(5.0));
    }

    #[test]
    fn medicine_tolerates_wrong_field_types() {
        let med = Medicine::from_record(&json!({"name": 12, "price": "cheap"})).unwrap();
        assert_eq!(med, Medicine::default());

        let med = Medicine::from_record(&json!({"name": "   ", "price": null})).unwrap();
        assert!(med.name.is_none());
        assert!(med.price.is_none());
    }

    #[test]
    fn null_record_is_shape_error() {
        let err = Medicine::from_record(&Value::Null).unwrap_err();
        assert_eq!(err.found, "null");
    }

    #[test]
    fn scalar_and_array_records_become_placeholders() {
        for record in [json!(7), json!("junk"), json!(true), json!([1])] {
            assert_eq!(Medicine::from_record(&record), Ok(Medicine::default()), "{record}");
        }
    }

    #[test]
    fn aggregate_reads_null_average() {
        let stats: AggregateStats =
            serde_json::from_str(r#"{"average_price":null,"count":0}"#).unwrap();
        assert_eq!(stats.average, None);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn aggregate_defaults_missing_fields() {
        let stats: AggregateStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.average, None);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn display_text_prefers_message_then_error() {
        let both = SubmissionResult {
            message: Some("created".into()),
            error: Some("ignored".into()),
        };
        assert_eq!(both.display_text(), "created");

        let error_only = SubmissionResult {
            message: Some(String::new()),
            error: Some("Medicine not found".into()),
        };
        assert_eq!(error_only.display_text(), "Medicine not found");

        assert_eq!(SubmissionResult::default().display_text(), "Done.");
    }

    #[test]
    fn form_data_keeps_raw_values_in_order() {
        let form = FormData::new().with("name", "Cough syrup").with("price", "4.5&up");
        assert_eq!(form.fields()[0].0, "name");
        assert_eq!(form.get("price"), Some("4.5&up"));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn new_medicine_to_form() {
        let form = NewMedicine {
            name: "Aspirin".into(),
            price: 2.5,
        }
        .to_form();
        assert_eq!(form.fields(), &[
            ("name".to_string(), "Aspirin".to_string()),
            ("price".to_string(), "2.5".to_string()),
        ]);
    }
}
