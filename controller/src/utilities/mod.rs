pub mod command;
pub mod debug;
pub mod logging;
