//! Constant-payment loan schedule.
//!
//! Each month the fixed payment comes off the balance first, then monthly
//! interest accrues on what is left. The schedule stops once the balance is
//! paid off or after [`PAYMENT_LIMIT`] payments, whichever comes first.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calendar::{month_label, next_month};
use crate::error::CalcError;
use crate::observer::Observer;
use crate::types::{AmortizationSchedule, CapReached, DISPLAY_DP, RemainingMonthlyPayment};
use crate::CalcResult;

/// Five years of monthly payments.
pub const PAYMENT_LIMIT: u32 = 60;

/// Converts an annual percentage rate (e.g. 6 for 6%) to a monthly fraction.
pub fn monthly_rate(apr: Decimal) -> Decimal {
    apr / dec!(12) / dec!(100)
}

/// Builds the month-by-month schedule for paying `starting_balance` down with
/// a fixed `monthly_payment`.
///
/// When the limit is hit with a balance still owing, the partial schedule is
/// returned with `cap_reached` set. That includes a payment that never clears
/// the balance, zero included.
///
/// # Errors
///
/// Returns `InvalidInput` if `starting_month` is not 1-12, and `OutOfRange`
/// if the balance grows past what `Decimal` can hold.
pub fn calc_constant_monthly_loan_payments(
    starting_balance: Decimal,
    monthly_payment: Decimal,
    apr: Decimal,
    starting_month: u32,
    starting_year: i32,
    observer: &dyn Observer,
) -> CalcResult<AmortizationSchedule> {
    if !(1..=12).contains(&starting_month) {
        return Err(CalcError::InvalidInput {
            field: "startingMonth".into(),
            reason: format!("{starting_month} is not between 1 and 12"),
        });
    }

    let monthly_apr = monthly_rate(apr);
    let mut remaining_balance = starting_balance;
    let (mut month, mut year) = (starting_month, starting_year);
    let mut payment_index = 0;
    let mut payments = Vec::new();

    observer.observe(&format!(
        "Paying {monthly_payment} a month against {starting_balance} at {apr}% APR ({monthly_apr} per month)"
    ));

    while payment_index < PAYMENT_LIMIT && remaining_balance > Decimal::ZERO {
        let actual_payment = monthly_payment.min(remaining_balance);
        let balance_after_payment = remaining_balance
            .checked_sub(actual_payment)
            .ok_or_else(|| overflow_at(payment_index, "balance after payment"))?;
        let balance_after_interest = balance_after_payment
            .checked_mul(monthly_apr)
            .and_then(|interest| balance_after_payment.checked_add(interest))
            .ok_or_else(|| overflow_at(payment_index, "balance after interest"))?;

        let row = RemainingMonthlyPayment {
            payment_number: payment_index + 1,
            month_and_year: month_label(month, year)?,
            remaining_balance: remaining_balance.round_dp(DISPLAY_DP),
            monthly_payment: actual_payment.round_dp(DISPLAY_DP),
            balance_after_payment: balance_after_payment.round_dp(DISPLAY_DP),
            balance_after_payment_plus_interest: balance_after_interest.round_dp(DISPLAY_DP),
        };
        observer.observe(&format!(
            "#{} {}: paid {} leaving {}",
            row.payment_number,
            row.month_and_year,
            row.monthly_payment,
            row.balance_after_payment_plus_interest
        ));
        payments.push(row);

        (month, year) = next_month(month, year);
        remaining_balance = balance_after_interest;
        payment_index += 1;
    }

    let cap_reached = (remaining_balance > Decimal::ZERO).then(|| {
        let years = PAYMENT_LIMIT / 12;
        let message = format!(
            "Paying off this loan would take more than {years} years; {} is still owed after {PAYMENT_LIMIT} payments",
            remaining_balance.round_dp(DISPLAY_DP)
        );
        tracing::warn!("{message}");
        CapReached {
            limit: PAYMENT_LIMIT,
            years,
            message,
        }
    });

    Ok(AmortizationSchedule {
        payments,
        cap_reached,
    })
}

fn overflow_at(payment_index: u32, what: &str) -> CalcError {
    CalcError::out_of_range(format!("{what} at payment {}", payment_index + 1))
}
