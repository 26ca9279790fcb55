use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::patch::{deserialize_some, merge, set};

/// A sellable material, priced per `unit` (e.g. `m³`, `t`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("name", &self.name);
        v.required("unit", &self.unit);
        v.into_result()
    }

    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            unit: self.unit,
            description: self.description,
            active: self.active.unwrap_or(true),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_opt("name", self.name.as_deref());
        v.required_opt("unit", self.unit.as_deref());
        v.into_result()
    }
}

impl Product {
    pub fn apply(&mut self, patch: ProductPatch) {
        set(&mut self.name, patch.name);
        set(&mut self.unit, patch.unit);
        merge(&mut self.description, patch.description);
        set(&mut self.active, patch.active);
    }
}
