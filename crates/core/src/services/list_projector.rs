use std::cmp::Ordering;

use crate::models::listing::SortCriterion;
use crate::models::quote::PriceQuote;

/// Keep quotes whose name contains `query`, ignoring case.
/// An empty query keeps everything, in input order.
pub fn filter<'a>(quotes: &'a [PriceQuote], query: &str) -> Vec<&'a PriceQuote> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return quotes.iter().collect();
    }
    quotes
        .iter()
        .filter(|quote| quote.name.to_lowercase().contains(&q))
        .collect()
}

/// Sort descending by the selected key. `sort_by` is stable, so keys that
/// compare equal (including `0.0` and `-0.0`) keep their input order.
pub fn sort(quotes: &mut [&PriceQuote], criterion: SortCriterion) {
    match criterion {
        SortCriterion::Price => quotes.sort_by(|a, b| descending(a.price, b.price)),
        SortCriterion::PercentageChange => {
            quotes.sort_by(|a, b| descending(a.price_change_24h, b.price_change_24h))
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// The ordered rows to render: filter by `query`, then sort by `criterion`.
///
/// Pure and recomputed from scratch on every call.
pub fn project(quotes: &[PriceQuote], query: &str, criterion: SortCriterion) -> Vec<PriceQuote> {
    let mut rows = filter(quotes, query);
    sort(&mut rows, criterion);
    rows.into_iter().cloned().collect()
}
