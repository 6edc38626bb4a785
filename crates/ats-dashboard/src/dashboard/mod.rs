//! Dashboard service: a record store, the projector settings, and the HTTP
//! routes serving projected list views for each record kind.

pub mod query;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use query::{ViewParameterError, ViewQuery, MAX_PAGE_SIZE};
pub use repository::{RecordStore, StoreError};
pub use router::{dashboard_router, DashboardRecord};
pub use service::{DashboardError, DashboardService};
