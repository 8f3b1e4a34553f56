//! # Currency Formatter
//!
//! Pure formatting of amounts for display. The calculator never formats;
//! this is strictly for the UI and for document previews.
//!
//! ## Locale Conventions
//! ```text
//! USD:  $1,234.56      comma groups, dot decimal
//! VES:  Bs. 1.234,56   dot groups, comma decimal
//!
//! Negatives keep the sign ahead of the symbol: -$1,234.56
//! ```

use crate::money::Money;
use crate::types::Currency;

/// Formats an amount with its currency symbol and locale grouping.
///
/// ## Example
/// ```rust
/// use folio_core::format::format_amount;
/// use folio_core::money::Money;
/// use folio_core::types::Currency;
///
/// let amount = Money::from_cents(123_456);
/// assert_eq!(format_amount(amount, Currency::Usd), "$1,234.56");
/// assert_eq!(format_amount(amount, Currency::Ves), "Bs. 1.234,56");
/// ```
pub fn format_amount(amount: Money, currency: Currency) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let abs = amount.abs();
    let grouped = group_digits(abs.major_units(), currency.group_separator());

    format!(
        "{}{}{}{}{:02}",
        sign,
        currency.symbol(),
        grouped,
        currency.decimal_separator(),
        abs.minor_units()
    )
}

/// Inserts a separator every three digits, right to left.
fn group_digits(value: i64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
