//! Performance calculation - marks current holdings to market.

mod performance_model;
mod performance_service;


pub use performance_model::{HoldingPerformance, PerformanceSnapshot};
pub use performance_service::{PerformanceService, PerformanceServiceTrait};
