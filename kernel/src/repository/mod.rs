pub mod booking;
pub mod health;
pub mod history;
pub mod notification;
pub mod space;
