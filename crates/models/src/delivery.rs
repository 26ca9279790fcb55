use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Violations};
use crate::patch::{deserialize_some, merge, set};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub order_id: String,
    pub scheduled_date: DateTime<Utc>,
    pub status: DeliveryStatus,
    pub address: Option<String>,
    pub driver_name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub notes: Option<String>,
    /// Stamped once, on the first transition into `delivered`.
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub order_id: String,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewDelivery {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required("orderId", &self.order_id);
        if let Some(plate) = &self.vehicle_plate {
            check_plate(&mut v, plate);
        }
        v.into_result()
    }

    pub fn into_delivery(self, id: String, now: DateTime<Utc>) -> Delivery {
        let status = self.status.unwrap_or_default();
        Delivery {
            id,
            order_id: self.order_id,
            scheduled_date: self.scheduled_date,
            status,
            address: self.address,
            driver_name: self.driver_name,
            vehicle_plate: self.vehicle_plate,
            notes: self.notes,
            delivered_at: (status == DeliveryStatus::Delivered).then_some(now),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPatch {
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub driver_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub vehicle_plate: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

impl DeliveryPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        if let Some(Some(plate)) = &self.vehicle_plate {
            check_plate(&mut v, plate);
        }
        v.into_result()
    }
}

impl Delivery {
    /// Merge `patch`; `delivered_at` is stamped with `now` only if the merged
    /// status is `delivered` and no timestamp exists yet. Returns whether this
    /// call stamped it.
    pub fn apply(&mut self, patch: DeliveryPatch, now: DateTime<Utc>) -> bool {
        set(&mut self.scheduled_date, patch.scheduled_date);
        set(&mut self.status, patch.status);
        merge(&mut self.address, patch.address);
        merge(&mut self.driver_name, patch.driver_name);
        merge(&mut self.vehicle_plate, patch.vehicle_plate);
        merge(&mut self.notes, patch.notes);
        if self.status == DeliveryStatus::Delivered && self.delivered_at.is_none() {
            self.delivered_at = Some(now);
            return true;
        }
        false
    }
}

fn check_plate(v: &mut Violations, plate: &str) {
    let plate = plate.trim();
    if plate.is_empty() {
        return;
    }
    if plate.len() > 10 || !plate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ') {
        v.push("vehiclePlate", "must be up to 10 letters, digits or dashes");
    }
}
