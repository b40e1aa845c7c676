//! Declarative field mapping from raw records to candidate documents
//!
//! Each entity kind has a table of [`FieldRule`]s naming the source header,
//! the target field, a coercion and an optional default. Tables are checked
//! once when the mapper is built.

use super::error::MappingError;
use super::types::RawRecord;
use crate::core::models::{CandidateDocument, EntityKind};
use crate::utils::error::{Result, SuppliesError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::{HashMap, HashSet};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"));

/// Conversion applied to a trimmed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    /// Lowercased and shape-checked
    Email,
    /// Finite decimal number
    Number,
}

impl Coercion {
    /// Coerce a cell. Blank cells are absent (`Ok(None)`).
    pub fn apply(&self, raw: &str) -> std::result::Result<Option<Value>, String> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        match self {
            Coercion::Text => Ok(Some(Value::String(value.to_string()))),
            Coercion::Email => {
                let lowered = value.to_lowercase();
                if EMAIL_PATTERN.is_match(&lowered) {
                    Ok(Some(Value::String(lowered)))
                } else {
                    Err(format!("'{}' is not a valid email address", value))
                }
            }
            Coercion::Number => value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .and_then(Number::from_f64)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| format!("'{}' is not a number", value)),
        }
    }
}

/// How one target field is filled from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub target: &'static str,
    pub source: &'static str,
    /// The entity cannot be stored without this field
    pub required: bool,
    pub coercion: Coercion,
    pub default: Option<&'static str>,
}

impl FieldRule {
    pub const fn text(target: &'static str, source: &'static str) -> Self {
        Self {
            target,
            source,
            required: false,
            coercion: Coercion::Text,
            default: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn coerce(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    pub const fn or_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

const SCHOOL_RULES: &[FieldRule] = &[
    FieldRule::text("name", "Name").required(),
    FieldRule::text("state", "State").required(),
    FieldRule::text("district", "District").required(),
];

const CONTACT_RULES: &[FieldRule] = &[
    FieldRule::text("name", "Name").required(),
    FieldRule::text("email", "Email").required().coerce(Coercion::Email),
    FieldRule::text("phone", "Phone").required(),
    FieldRule::text("role", "Role").or_default("general"),
    FieldRule::text("organization", "Organization"),
];

const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::text("name", "Name").required(),
    FieldRule::text("category", "Category").required(),
    FieldRule::text("price", "Price").required().coerce(Coercion::Number),
    FieldRule::text("description", "Description"),
];

const VENDOR_RULES: &[FieldRule] = &[
    FieldRule::text("name", "Name").required(),
    FieldRule::text("contact_person", "ContactPerson").required(),
    FieldRule::text("email", "Email").required().coerce(Coercion::Email),
    FieldRule::text("phone", "Phone").required(),
    FieldRule::text("address", "Address"),
];

/// Field rules of one entity kind
#[derive(Debug, Clone, Copy)]
pub struct MappingTable {
    pub kind: EntityKind,
    pub rules: &'static [FieldRule],
}

impl MappingTable {
    pub fn standard(kind: EntityKind) -> Self {
        let rules = match kind {
            EntityKind::School => SCHOOL_RULES,
            EntityKind::Contact => CONTACT_RULES,
            EntityKind::Product => PRODUCT_RULES,
            EntityKind::Vendor => VENDOR_RULES,
        };
        Self { kind, rules }
    }

    /// Headers a well-formed file of this kind carries
    pub fn expected_headers(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.source).collect()
    }

    /// Source headers of required fields that `headers` lacks
    pub fn missing_required_headers(&self, headers: &[String]) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.required)
            .filter(|rule| !headers.iter().any(|h| h == rule.source))
            .map(|rule| rule.source)
            .collect()
    }

    /// Check the table against the entity schema
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut targets = HashSet::new();
        let mut sources = HashSet::new();
        for rule in self.rules {
            if !targets.insert(rule.target) {
                return Err(format!("target field '{}' is mapped twice", rule.target));
            }
            if !sources.insert(rule.source) {
                return Err(format!("source header '{}' is mapped twice", rule.source));
            }
            if let Some(default) = rule.default {
                match rule.coercion.apply(default) {
                    Ok(Some(_)) => {}
                    _ => {
                        return Err(format!(
                            "default '{}' for '{}' does not satisfy its coercion",
                            default, rule.target
                        ));
                    }
                }
            }
        }

        for field in self.kind.required_fields() {
            if !self.rules.iter().any(|rule| rule.target == *field && rule.required) {
                return Err(format!("required field '{}' has no required rule", field));
            }
        }

        let probe = self
            .rules
            .iter()
            .map(|rule| (rule.target.to_string(), Value::Null))
            .collect::<Map<_, _>>();
        CandidateDocument::from_fields(self.kind, probe)
            .map_err(|e| format!("targets do not match the {} document: {}", self.kind, e))?;

        Ok(())
    }
}

/// Maps raw records to candidate documents
#[derive(Debug, Clone)]
pub struct FieldMapper {
    tables: HashMap<EntityKind, MappingTable>,
}

impl FieldMapper {
    /// Build the mapper with the standard tables, validating each one
    pub fn new() -> Result<Self> {
        Self::with_tables(EntityKind::ALL.into_iter().map(MappingTable::standard))
    }

    pub fn with_tables(tables: impl IntoIterator<Item = MappingTable>) -> Result<Self> {
        let mut by_kind = HashMap::new();
        for table in tables {
            table.validate().map_err(|reason| {
                SuppliesError::config(format!("Invalid {} mapping table: {}", table.kind, reason))
            })?;
            by_kind.insert(table.kind, table);
        }
        Ok(Self { tables: by_kind })
    }

    pub fn table(&self, kind: EntityKind) -> Option<&MappingTable> {
        self.tables.get(&kind)
    }

    /// Map one record. Fields whose header is missing or whose cell is blank
    /// are left absent unless the rule has a default.
    pub fn map_one(
        &self,
        record: &RawRecord,
        kind: EntityKind,
    ) -> std::result::Result<CandidateDocument, MappingError> {
        if let Some(defect) = record.defect() {
            return Err(MappingError::malformed_row(record.row(), defect));
        }

        let table = self.table(kind).ok_or_else(|| {
            MappingError::malformed_row(record.row(), format!("no mapping table for {}", kind))
        })?;

        let mut fields = Map::new();
        for rule in table.rules {
            let value = match record.get(rule.source) {
                Some(raw) => rule
                    .coercion
                    .apply(raw)
                    .map_err(|reason| MappingError::invalid_value(record.row(), rule.source, reason))?,
                None => None,
            };

            let value =
                value.or_else(|| rule.default.and_then(|d| rule.coercion.apply(d).ok().flatten()));
            if let Some(value) = value {
                fields.insert(rule.target.to_string(), value);
            }
        }

        CandidateDocument::from_fields(kind, fields)
            .map_err(|e| MappingError::malformed_row(record.row(), e.to_string()))
    }
}
