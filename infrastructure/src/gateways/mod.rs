//! HTTP gateways for external data sources.

pub mod campus;
pub mod serp;
