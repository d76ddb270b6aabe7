//! Fairness scorer
//!
//! Pure math, no state. The score compares the value each side puts in:
//!   score = round(100 * min(mine, theirs) / max(mine, theirs))
//!
//! An empty board, or a board where one side gives nothing, scores 0.
//! Only balanced totals score 100. Totals within a relative
//! [`BALANCE_TOLERANCE`] of each other count as balanced, so decimal values
//! that add up the same way the user reads them (0.1 + 0.2 vs 0.3) still do.

use crate::valuation::TradeItem;

/// Largest relative gap between totals still treated as equal
pub const BALANCE_TOLERANCE: f64 = 1e-9;

/// Whether two totals are equal up to float summation error
pub fn totals_balanced(a: f64, b: f64) -> bool {
    (a - b).abs() <= a.abs().max(b.abs()) * BALANCE_TOLERANCE
}

/// Sum of staged values on one side
pub fn side_total(items: &[TradeItem]) -> f64 {
    items.iter().map(|item| item.value.max(0.0)).sum()
}

/// Score a board from both sides' staged items. Symmetric in its arguments.
pub fn fairness_score(mine: &[TradeItem], theirs: &[TradeItem]) -> u8 {
    score_totals(side_total(mine), side_total(theirs))
}

/// Score two aggregate values.
pub fn score_totals(a: f64, b: f64) -> u8 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if low.is_nan() || low <= 0.0 || !high.is_finite() {
        return 0;
    }

    if totals_balanced(low, high) {
        return 100;
    }
    // Nearly-equal totals round up to 100; keep 100 for balanced ones.
    let score = (100.0 * low / high).round() as u8;
    score.min(99)
}
