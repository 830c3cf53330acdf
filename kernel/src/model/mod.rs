pub mod booking;
pub mod history;
pub mod id;
pub mod notification;
pub mod role;
