pub mod config;
pub mod dashboard;
pub mod error;
pub mod projector;
pub mod records;
pub mod session;
pub mod telemetry;
