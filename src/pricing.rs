//! Pricing

use std::num::TryFromIntError;

use rusty_money::{FormattableCurrency, Formatter, LocalFormat, Money, Params, Position, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while converting a cart total into money.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// The total does not fit into the money type's signed range.
    #[error("cart total is too large to represent")]
    Overflow(#[from] TryFromIntError),
}

/// Sum of `price * quantity` over all items.
pub fn total_amount(items: &[LineItem]) -> u64 {
    items
        .iter()
        .fold(0_u64, |acc, item| acc.saturating_add(item.line_total()))
}

/// Sum of quantities over all items.
pub fn total_item_count(items: &[LineItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.quantity().get()))
        .sum()
}

/// Calculates the total of a list of items in the given currency.
///
/// An empty list totals zero.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the total exceeds `i64::MAX`.
pub fn total_money(
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    to_money(total_amount(items), currency)
}

/// Converts an amount in whole currency units into money.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the amount exceeds `i64::MAX`.
pub fn to_money(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    Ok(Money::from_major(i64::try_from(amount)?, currency))
}

/// Formats money in its currency's locale with no fraction digits, e.g. `$18.000` for COP.
pub fn format_whole(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();
    let format = LocalFormat::from_locale(currency.locale());

    let positions: &[Position] = if currency.symbol_first() {
        &[Position::Sign, Position::Symbol, Position::Amount]
    } else {
        &[Position::Sign, Position::Amount, Position::Symbol]
    };

    Formatter::money(
        money,
        Params {
            digit_separator: format.digit_separator,
            exponent_separator: format.exponent_separator,
            separator_pattern: format.digit_separator_pattern,
            positions,
            rounding: Some(0),
            symbol: Some(currency.symbol()),
            code: Some(currency.code()),
        },
    )
}
