//! Plain-text rendering of the price list, detail view and holdings.
//!
//! Every function returns a `String` so the output can be asserted on;
//! `main` only prints.

use std::fmt::Write;

use coin_watch_core::models::holding::HoldingEntry;
use coin_watch_core::models::listing::{QuoteDetail, SortCriterion};
use coin_watch_core::models::quote::PriceQuote;
use coin_watch_core::models::series::{SeriesPoint, Tone};
use coin_watch_core::services::series_service::SeriesService;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Color a sparkline glyph by glyph, following each point's tone.
pub fn colored_sparkline(points: &[SeriesPoint], color: bool) -> String {
    let glyphs = SeriesService::sparkline(points);
    if !color {
        return glyphs;
    }
    let mut out = String::new();
    for (glyph, point) in glyphs.chars().zip(points) {
        let code = match point.tone {
            Tone::Positive => GREEN,
            Tone::Negative => RED,
        };
        let _ = write!(out, "{code}{glyph}{RESET}");
    }
    out
}

fn change_cell(quote: &PriceQuote, color: bool) -> String {
    let arrow = if quote.is_up() { '▲' } else { '▼' };
    let text = format!("{arrow} {:+.2}%", quote.price_change_24h);
    if !color {
        return text;
    }
    let code = if quote.is_up() { GREEN } else { RED };
    format!("{code}{text}{RESET}")
}

/// Render the price list. `sparklines` pairs each row with its chart.
pub fn render_quotes(
    rows: &[PriceQuote],
    sparklines: &[Vec<SeriesPoint>],
    query: &str,
    criterion: SortCriterion,
    stale: bool,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = write!(out, "Live prices (sorted by {criterion}");
    if !query.is_empty() {
        let _ = write!(out, ", search \"{query}\"");
    }
    out.push(')');
    if stale {
        out.push_str("  [stale]");
    }
    out.push('\n');

    if rows.is_empty() {
        out.push_str("  no matching assets\n");
        return out;
    }

    for (i, quote) in rows.iter().enumerate() {
        let spark = sparklines
            .get(i)
            .map(|s| colored_sparkline(s, color))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<14} {:>14.2} USD  {:<12} {}",
            quote.name,
            quote.price,
            change_cell(quote, color),
            spark
        );
    }
    out
}

/// Render the detail view of one asset.
pub fn render_detail(detail: &QuoteDetail, color: bool) -> String {
    let q = &detail.quote;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", q.name, q.id);
    let _ = writeln!(out, "  icon:               {}", detail.icon_url);
    let _ = writeln!(out, "  price:              {:.2} USD", q.price);
    let _ = writeln!(out, "  24h change:         {}", change_cell(q, color));
    let _ = writeln!(out, "  market cap:         {:.0}", q.market_cap);
    let _ = writeln!(out, "  volume:             {:.0}", q.volume);
    let _ = writeln!(out, "  circulating supply: {:.0}", q.circulating_supply);
    let _ = writeln!(out, "  24h chart:          {}", colored_sparkline(&detail.series, color));
    out
}

/// Render the holdings list.
pub fn render_holdings(holdings: &[HoldingEntry]) -> String {
    let mut out = String::from("Portfolio\n");
    if holdings.is_empty() {
        out.push_str("  no holdings\n");
        return out;
    }
    for (i, h) in holdings.iter().enumerate() {
        let _ = writeln!(out, "  {i:>2}. {:<14} {:>14} value {:.2} USD", h.name, h.amount, h.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes() -> Vec<PriceQuote> {
        vec![
            PriceQuote::new("bitcoin", 50000.0, 2.0),
            PriceQuote::new("ethereum", 3000.0, -1.5),
        ]
    }

    #[test]
    fn list_shows_names_in_row_order() {
        let out = render_quotes(&quotes(), &[], "", SortCriterion::Price, false, false);
        let btc = out.find("Bitcoin").unwrap();
        let eth = out.find("Ethereum").unwrap();
        assert!(btc < eth);
        assert!(out.contains("▲ +2.00%"));
        assert!(out.contains("▼ -1.50%"));
        assert!(!out.contains("[stale]"));
    }

    #[test]
    fn list_marks_stale_data() {
        let out = render_quotes(&quotes(), &[], "", SortCriterion::Price, true, false);
        assert!(out.lines().next().unwrap().ends_with("[stale]"));
    }

    #[test]
    fn empty_list_says_so() {
        let out = render_quotes(&[], &[], "xyz", SortCriterion::PercentageChange, false, false);
        assert!(out.contains("search \"xyz\""));
        assert!(out.contains("no matching assets"));
    }

    #[test]
    fn uncolored_sparkline_has_one_glyph_per_point() {
        let series = SeriesService::new().generate();
        assert_eq!(colored_sparkline(&series, false).chars().count(), series.len());
    }

    #[test]
    fn holdings_show_zero_value() {
        let out = render_holdings(&[HoldingEntry::new("BTC", 1.5)]);
        assert!(out.contains("BTC"));
        assert!(out.contains("value 0.00 USD"));
    }
}
