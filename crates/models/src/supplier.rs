use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::patch::{deserialize_some, merge, set};

/// Quarry or plant the representative sells for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl NewSupplier {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("name", &self.name);
        v.into_result()
    }

    pub fn into_supplier(self, id: String, now: DateTime<Utc>) -> Supplier {
        Supplier {
            id,
            name: self.name,
            document: self.document,
            phone: self.phone,
            email: self.email,
            active: self.active.unwrap_or(true),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub document: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl SupplierPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_opt("name", self.name.as_deref());
        v.into_result()
    }
}

impl Supplier {
    pub fn apply(&mut self, patch: SupplierPatch) {
        set(&mut self.name, patch.name);
        merge(&mut self.document, patch.document);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.email, patch.email);
        set(&mut self.active, patch.active);
    }
}
