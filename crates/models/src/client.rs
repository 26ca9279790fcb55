use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::patch::{deserialize_some, merge, set};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    #[default]
    Individual,
    Organization,
}

/// A customer buying through the representative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClientType,
    pub name: String,
    pub trade_name: Option<String>,
    /// Tax registration (personal or company document number).
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[serde(rename = "type", default)]
    pub kind: ClientType,
    pub name: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("name", &self.name);
        if let Some(email) = &self.email {
            check_email(&mut v, email);
        }
        v.into_result()
    }

    pub fn into_client(self, id: String, now: DateTime<Utc>) -> Client {
        Client {
            id,
            kind: self.kind,
            name: self.name,
            trade_name: self.trade_name,
            document: self.document,
            phone: self.phone,
            email: self.email,
            street: self.street,
            number: self.number,
            complement: self.complement,
            district: self.district,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            notes: self.notes,
            active: self.active.unwrap_or(true),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(rename = "type", default)]
    pub kind: Option<ClientType>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub trade_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub document: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub street: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub complement: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub district: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl ClientPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_opt("name", self.name.as_deref());
        if let Some(Some(email)) = &self.email {
            check_email(&mut v, email);
        }
        v.into_result()
    }
}

impl Client {
    pub fn apply(&mut self, patch: ClientPatch) {
        set(&mut self.kind, patch.kind);
        set(&mut self.name, patch.name);
        merge(&mut self.trade_name, patch.trade_name);
        merge(&mut self.document, patch.document);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.email, patch.email);
        merge(&mut self.street, patch.street);
        merge(&mut self.number, patch.number);
        merge(&mut self.complement, patch.complement);
        merge(&mut self.district, patch.district);
        merge(&mut self.city, patch.city);
        merge(&mut self.state, patch.state);
        merge(&mut self.zip_code, patch.zip_code);
        merge(&mut self.notes, patch.notes);
        set(&mut self.active, patch.active);
    }
}

fn check_email(v: &mut Violations, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        return;
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => v.push("email", "must be a valid email address"),
    }
}
