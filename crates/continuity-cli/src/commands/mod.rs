pub mod config;
pub mod interactive;
pub mod log;
pub mod reset;
pub mod status;
pub mod toggle;
