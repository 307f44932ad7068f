pub mod config;
pub mod direction;
pub mod elevator_state;
pub mod elevator_status;
pub mod error;
pub mod event;
