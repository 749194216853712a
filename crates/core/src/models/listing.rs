use serde::{Deserialize, Serialize};

use super::quote::PriceQuote;
use super::series::SeriesPoint;

/// Sort order for the price list. Changing it never triggers a refetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortCriterion {
    /// Highest price first
    #[default]
    Price,
    /// Largest 24h gain first, losses last
    PercentageChange,
}

impl std::fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortCriterion::Price => write!(f, "Price"),
            SortCriterion::PercentageChange => write!(f, "Percentage Change"),
        }
    }
}

/// Everything the per-asset detail view shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDetail {
    pub quote: PriceQuote,

    /// Icon URL from the static icon table (placeholder for unknown ids)
    pub icon_url: String,

    /// Synthetic chart data, regenerated every time the detail is built.
    /// Unrelated to the real price.
    pub series: Vec<SeriesPoint>,
}
