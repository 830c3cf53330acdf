pub mod clock;
pub mod event;
pub mod lifecycle;
pub mod model;
pub mod repository;
