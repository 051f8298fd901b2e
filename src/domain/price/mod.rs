//! Price domain - spot prices from pair reserves

mod price_calculator;

pub use price_calculator::PriceCalculator;
