pub mod check;
pub mod notification;
pub mod snapshot;

pub use check::{CheckResult, CycleReport};
pub use notification::{NotificationRequest, CHANGE_SUBJECT};
pub use snapshot::Snapshot;
