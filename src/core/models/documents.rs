//! Candidate documents produced by the field mapper
//!
//! Every field is optional on a draft. Whether a document is complete enough
//! to be stored is decided by the storage layer at insert time.

use super::entity::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// School draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchoolDraft {
    pub name: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

/// Contact draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub organization: Option<String>,
}

/// Product draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Vendor draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorDraft {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A mapped, not yet persisted entity value
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateDocument {
    School(SchoolDraft),
    Contact(ContactDraft),
    Product(ProductDraft),
    Vendor(VendorDraft),
}

impl CandidateDocument {
    /// Build a typed draft of `kind` from mapped field values
    pub fn from_fields(kind: EntityKind, fields: Map<String, Value>) -> serde_json::Result<Self> {
        let value = Value::Object(fields);
        Ok(match kind {
            EntityKind::School => CandidateDocument::School(serde_json::from_value(value)?),
            EntityKind::Contact => CandidateDocument::Contact(serde_json::from_value(value)?),
            EntityKind::Product => CandidateDocument::Product(serde_json::from_value(value)?),
            EntityKind::Vendor => CandidateDocument::Vendor(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            CandidateDocument::School(_) => EntityKind::School,
            CandidateDocument::Contact(_) => EntityKind::Contact,
            CandidateDocument::Product(_) => EntityKind::Product,
            CandidateDocument::Vendor(_) => EntityKind::Vendor,
        }
    }

    /// Field map view of the draft; absent fields are `null`
    pub fn to_fields(&self) -> Map<String, Value> {
        let value = match self {
            CandidateDocument::School(draft) => serde_json::to_value(draft),
            CandidateDocument::Contact(draft) => serde_json::to_value(draft),
            CandidateDocument::Product(draft) => serde_json::to_value(draft),
            CandidateDocument::Vendor(draft) => serde_json::to_value(draft),
        };

        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Required fields of this document's kind that are absent
    pub fn missing_required(&self) -> Vec<&'static str> {
        let fields = self.to_fields();
        self.kind()
            .required_fields()
            .iter()
            .copied()
            .filter(|name| fields.get(*name).is_none_or(Value::is_null))
            .collect()
    }

    /// Schema validation message for missing required fields, if any
    pub fn validation_error(&self) -> Option<String> {
        let missing = self.missing_required();
        if missing.is_empty() {
            return None;
        }

        Some(
            missing
                .iter()
                .map(|field| format!("Path `{}` is required.", field))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Values of the unique fields that are present, as `(field, value)`
    pub fn unique_values(&self) -> Vec<(&'static str, String)> {
        let fields = self.to_fields();
        self.kind()
            .unique_fields()
            .iter()
            .filter_map(|name| match fields.get(*name) {
                Some(Value::String(value)) => Some((*name, value.clone())),
                _ => None,
            })
            .collect()
    }
}
