pub mod booking;
pub mod history;
pub mod notification;
