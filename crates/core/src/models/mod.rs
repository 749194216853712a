pub mod holding;
pub mod listing;
pub mod quote;
pub mod series;
pub mod session;
pub mod settings;
pub mod snapshot;
