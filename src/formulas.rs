//! Share-sizing and investment valuation formulas.
//!
//! A zero price typed in by the user is an error. A zero price that comes out
//! of a projection gives [`Suggestion::NotComputable`] instead.

use rust_decimal::Decimal;

use crate::error::CalcError;
use crate::observer::Observer;
use crate::types::{InvestmentSuggestion, InvestmentValue, Suggestion};
use crate::CalcResult;

/// Projects the next price by repeating the move from `old_price` to
/// `current_price` once more, then sizes the position for that price.
///
/// Decimal keeps at most 28 fractional digits, so a projection smaller than
/// `1e-28` cannot be told apart from zero. That case is reported as
/// `OutOfRange` rather than `NotComputable`, which is kept for a projection
/// that is really zero (a zero current price).
///
/// # Errors
///
/// Returns `DivideByZero` if `old_price` is zero, and `OutOfRange` if the
/// projection overflows or underflows `Decimal`.
pub fn invest_given_previous_growth(
    current_price: Decimal,
    old_price: Decimal,
    target_balance: Decimal,
    observer: &dyn Observer,
) -> CalcResult<Suggestion> {
    if old_price.is_zero() {
        return Err(CalcError::divide_by_zero("rate of change from old price"));
    }

    let rate_of_change = current_price
        .checked_div(old_price)
        .ok_or_else(|| CalcError::out_of_range("rate of change from old price"))?;
    let next_price = current_price
        .checked_mul(rate_of_change)
        .ok_or_else(|| CalcError::out_of_range("projected next price"))?;
    observer.observe(&format!(
        "Price moved from {old_price} to {current_price}, a rate of change of {rate_of_change}; projected next price {next_price}"
    ));

    if next_price.is_zero() && !current_price.is_zero() {
        return Err(CalcError::out_of_range(
            "projected next price is below Decimal precision",
        ));
    }
    if next_price.is_zero() {
        observer.observe("Projected price is zero, no suggestion possible");
        return Ok(Suggestion::NotComputable);
    }

    invest_given_target_price(current_price, next_price, target_balance, observer)
}

/// Sizes a position so that it is worth `target_balance` once the price
/// reaches `target_price`.
///
/// # Errors
///
/// Returns `OutOfRange` if the share count or its cost overflows `Decimal`.
pub fn invest_given_target_price(
    current_price: Decimal,
    target_price: Decimal,
    target_balance: Decimal,
    observer: &dyn Observer,
) -> CalcResult<Suggestion> {
    if target_price.is_zero() {
        observer.observe("Target price is zero, no suggestion possible");
        return Ok(Suggestion::NotComputable);
    }

    let shares_to_buy = target_balance
        .checked_div(target_price)
        .ok_or_else(|| CalcError::out_of_range("shares to buy at target price"))?;
    let investment_value = current_price
        .checked_mul(shares_to_buy)
        .ok_or_else(|| CalcError::out_of_range("investment value at current price"))?;
    observer.observe(&format!(
        "Buy {shares_to_buy} shares at {current_price} for {investment_value} to hold {target_balance} at {target_price}"
    ));

    Ok(Suggestion::Computed(InvestmentSuggestion {
        shares_to_buy,
        investment_value,
        will_reach_target_balance_at_price: target_price,
        current_price,
        target_balance,
    }))
}

/// What `intended_investment_amount` would be worth at `price_now` had it
/// been invested at `price_paid`.
///
/// # Errors
///
/// Returns `DivideByZero` if `price_paid` is zero, and `OutOfRange` if the
/// result overflows `Decimal`.
pub fn invest_for_missed_opportunity(
    intended_investment_amount: Decimal,
    price_now: Decimal,
    price_paid: Decimal,
    observer: &dyn Observer,
) -> CalcResult<InvestmentValue> {
    if price_paid.is_zero() {
        return Err(CalcError::divide_by_zero("shares bought at price paid"));
    }

    let value = investment_value(intended_investment_amount, price_paid, price_now)?;
    observer.observe(&format!(
        "Investing {intended_investment_amount} at {price_paid} would now be worth {} ({} profit)",
        value.value, value.profit
    ));

    Ok(value)
}

/// Values `intended_investment_amount`, bought at `current_price`, at each of
/// `next_prices` in order.
///
/// # Errors
///
/// Returns `DivideByZero` if `current_price` is zero, even when `next_prices`
/// is empty, and `OutOfRange` if any valuation overflows `Decimal`.
pub fn invest_potential_investment(
    intended_investment_amount: Decimal,
    current_price: Decimal,
    next_prices: &[Decimal],
    observer: &dyn Observer,
) -> CalcResult<Vec<InvestmentValue>> {
    if current_price.is_zero() {
        return Err(CalcError::divide_by_zero("shares bought at current price"));
    }

    observer.observe(&format!(
        "Valuing {intended_investment_amount} bought at {current_price} across {} prices",
        next_prices.len()
    ));

    next_prices
        .iter()
        .map(|next_price| investment_value(intended_investment_amount, current_price, *next_price))
        .collect()
}

// Callers guarantee `price` is non-zero.
fn investment_value(
    initial_investment: Decimal,
    price: Decimal,
    next_price: Decimal,
) -> CalcResult<InvestmentValue> {
    let shares = initial_investment
        .checked_div(price)
        .ok_or_else(|| CalcError::out_of_range("shares bought"))?;
    let value = shares
        .checked_mul(next_price)
        .ok_or_else(|| CalcError::out_of_range(format!("value at {next_price}")))?;
    let profit = value
        .checked_sub(initial_investment)
        .ok_or_else(|| CalcError::out_of_range(format!("profit at {next_price}")))?;

    Ok(InvestmentValue {
        initial_investment,
        price,
        shares,
        next_price,
        value,
        profit,
    })
}
