//! Entity kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record kinds that can be bulk imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    School,
    Contact,
    Product,
    Vendor,
}

impl EntityKind {
    /// Every importable kind, in route registration order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::School,
        EntityKind::Contact,
        EntityKind::Product,
        EntityKind::Vendor,
    ];

    /// Collection (table) name, also used as the import route segment
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::School => "schools",
            EntityKind::Contact => "contacts",
            EntityKind::Product => "products",
            EntityKind::Vendor => "vendors",
        }
    }

    /// Fields a stored document must carry
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::School => &["name", "state", "district"],
            EntityKind::Contact => &["name", "email", "phone"],
            EntityKind::Product => &["name", "category", "price"],
            EntityKind::Vendor => &["name", "contact_person", "email", "phone"],
        }
    }

    /// Fields with a uniqueness constraint in storage
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::School => &["name"],
            EntityKind::Contact => &["email"],
            EntityKind::Product => &["name"],
            EntityKind::Vendor => &["name", "email"],
        }
    }

    /// Resolve a kind from its collection name
    pub fn from_collection(collection: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection() == collection)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "school" | "schools" => Ok(EntityKind::School),
            "contact" | "contacts" => Ok(EntityKind::Contact),
            "product" | "products" => Ok(EntityKind::Product),
            "vendor" | "vendors" => Ok(EntityKind::Vendor),
            other => Err(format!("Unknown entity kind: {}", other)),
        }
    }
}
