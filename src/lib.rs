//! pairshift - moves the spot price of a Uniswap V2 pair with one large swap
//! and reports the price before and after.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod math;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::{PriceShiftService, ShiftPlan};
pub use domain::pool::{PairResolver, PoolReference};
pub use domain::price::PriceCalculator;
pub use shared::errors::AppError;
