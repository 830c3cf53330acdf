//! The booking lifecycle: validation, authorization, the overlap invariant
//! and the status transitions themselves.

mod lock;
mod manager;

pub use lock::SpaceLocks;
pub use manager::BookingLifecycle;
