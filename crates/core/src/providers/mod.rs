pub mod icons;
pub mod registry;
pub mod traits;

// API provider implementations
pub mod coincap;
pub mod coingecko;
