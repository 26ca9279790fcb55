//! Service layer owning all entity state.
//! - `storage::Storage` is the contract the HTTP layer talks to.
//! - `storage::MemStorage` keeps every table in process memory behind one lock.
//! - `clock` and `calendar` make the "today" and "this month" windows testable.

pub mod errors;
pub mod clock;
pub mod calendar;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use storage::{DeliveryUpdate, MemStorage, Storage};
