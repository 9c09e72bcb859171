//! Summary
//!
//! Terminal rendering of cart contents.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{self, TotalPriceError, format_whole, to_money},
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount could not be converted into money.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Write a table of `items` followed by the item count and total.
///
/// # Errors
///
/// Returns a [`SummaryError`] if an amount cannot be formatted or writing fails.
pub fn write_summary(
    mut out: impl io::Write,
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if items.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Unit Price", "Qty", "Line Total"]);

    for (index, item) in items.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            item.product().name.clone(),
            format_whole(&to_money(item.price(), currency)?),
            item.quantity().to_string(),
            format_whole(&to_money(item.line_total(), currency)?),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}")?;

    let total = pricing::total_money(items, currency)?;

    writeln!(
        out,
        "Items: {}  Total: {}",
        pricing::total_item_count(items),
        format_whole(&total)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    #[test]
    fn empty_cart_writes_placeholder() -> TestResult {
        let mut out = Vec::new();

        write_summary(&mut out, &[], iso::COP)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn writes_row_per_line_and_totals() -> TestResult {
        let items = [
            LineItem::with_quantity(
                Product::new("a", "Kopi Susu", 18_000),
                NonZeroU32::try_from(2_u32)?,
            ),
            LineItem::new(Product::new("b", "Roti Bakar", 5_500)),
        ];
        let mut out = Vec::new();

        write_summary(&mut out, &items, iso::COP)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Kopi Susu"), "missing first line:\n{text}");
        assert!(text.contains("Roti Bakar"), "missing second line:\n{text}");
        assert!(text.contains("Line Total"), "missing header:\n{text}");
        assert!(text.contains("$18.000"), "missing unit price:\n{text}");
        assert!(text.contains("$36.000"), "missing line total:\n{text}");
        assert!(
            text.contains("Items: 3  Total: $41.500\n"),
            "missing totals:\n{text}"
        );

        Ok(())
    }
}
