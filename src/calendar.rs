//! Month parsing and labels for amortization rows.

use chrono::Month;

use crate::error::CalcError;
use crate::CalcResult;

/// Parses a month token into its 1-12 index.
///
/// Accepts a number (`"3"`), an abbreviation (`"mar"`) or a full name
/// (`"March"`), case-insensitive.
pub fn parse_month(token: &str) -> CalcResult<u32> {
    let token = token.trim();

    if let Ok(index) = token.parse::<u32>() {
        return match index {
            1..=12 => Ok(index),
            _ => Err(CalcError::Parse {
                field: "month".into(),
                reason: format!("{index} is not between 1 and 12"),
            }),
        };
    }

    token
        .parse::<Month>()
        .map(|month| month.number_from_month())
        .map_err(|_| CalcError::Parse {
            field: "month".into(),
            reason: format!("'{token}' is not a month number, abbreviation or name"),
        })
}

/// Display label for a month index and year, e.g. `Mar-2024`.
///
/// # Errors
///
/// Returns `InvalidInput` if `month` is not 1-12.
pub fn month_label(month: u32, year: i32) -> CalcResult<String> {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or_else(|| CalcError::InvalidInput {
            field: "month".into(),
            reason: format!("{month} is not between 1 and 12"),
        })?;

    Ok(format!("{}-{year}", &name[..3]))
}

/// The calendar month after `(month, year)`.
pub fn next_month(month: u32, year: i32) -> (u32, i32) {
    if month >= 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    }
}
