//! Portfolio module - holdings aggregation, performance, and coordination.

pub mod holdings;
pub mod performance;

mod portfolio_service;

#[cfg(test)]
mod portfolio_service_tests;

pub use holdings::{aggregate_holdings, Holding};
pub use performance::{
    HoldingPerformance, PerformanceService, PerformanceServiceTrait, PerformanceSnapshot,
};
pub use portfolio_service::PortfolioService;
