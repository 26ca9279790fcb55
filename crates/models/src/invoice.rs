use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::money;
use crate::patch::{deserialize_some, merge, set};

/// Fiscal document issued against an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    pub number: String,
    pub series: Option<String>,
    pub issue_date: NaiveDate,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub order_id: String,
    pub number: String,
    #[serde(default)]
    pub series: Option<String>,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub value: String,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("orderId", &self.order_id);
        v.required("number", &self.number);
        money::check_amount(&mut v, "value", &self.value);
        v.into_result()
    }

    pub fn into_invoice(self, id: String, now: DateTime<Utc>) -> Invoice {
        Invoice {
            id,
            order_id: self.order_id,
            number: self.number,
            series: self.series,
            issue_date: self.issue_date,
            value: self.value,
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub series: Option<Option<String>>,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub value: Option<String>,
}

impl InvoicePatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_opt("number", self.number.as_deref());
        if let Some(value) = &self.value {
            money::check_amount(&mut v, "value", value);
        }
        v.into_result()
    }
}

impl Invoice {
    pub fn apply(&mut self, patch: InvoicePatch) {
        set(&mut self.number, patch.number);
        merge(&mut self.series, patch.series);
        set(&mut self.issue_date, patch.issue_date);
        set(&mut self.value, patch.value);
    }
}
