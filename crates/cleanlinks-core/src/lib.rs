pub mod config;
pub mod error;
pub mod outbound;
pub mod types;
