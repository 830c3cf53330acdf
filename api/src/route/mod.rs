pub mod booking;
pub mod health;
pub mod notification;
pub mod v1;
