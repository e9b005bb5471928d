use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount for display with exactly two fraction digits.
///
/// Totals are kept unrounded everywhere else; this is the only place
/// rounding happens.
pub fn format_price(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${rounded}")
}
