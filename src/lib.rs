//! `invest_calc` is the calculation engine behind a console investment and
//! loan calculator.
//!
//! It answers five kinds of question, each a [`ScenarioKind`]:
//! - **Previous growth**: if the price repeats its last move, how many shares
//!   reach a target balance?
//! - **Target price**: how many shares reach a target balance at a given price?
//! - **Missed investment**: what would an amount bought at an old price be
//!   worth now?
//! - **Potential investment**: what is an amount bought now worth across a list
//!   of possible prices?
//! - **Constant loan payment**: month-by-month schedule for paying a balance
//!   down with a fixed payment, capped at five years.
//!
//! All amounts are `rust_decimal::Decimal`.
//!
//! ## Usage
//!
//! Call a formula directly:
//!
//! ```rust
//! use invest_calc::{invest_given_target_price, Silent};
//! use rust_decimal_macros::dec;
//!
//! let suggestion = invest_given_target_price(dec!(0.000028), dec!(0.001), dec!(100_000), &Silent)
//!     .unwrap();
//! let computed = suggestion.computed().unwrap();
//! assert_eq!(computed.shares_to_buy, dec!(100_000_000));
//! assert_eq!(computed.investment_value, dec!(2800));
//! ```
//!
//! Or go through the registry, which tells an input collector what to ask for:
//!
//! ```rust
//! use invest_calc::{run_scenario, select_scenario, ScenarioInputs, ScenarioKind, ScenarioOutcome};
//!
//! let spec = select_scenario(ScenarioKind::ConstantLoanPayment);
//! for field in spec.prompted_inputs() {
//!     println!("{}: ", field.prompt());
//! }
//!
//! let inputs = ScenarioInputs::from_json(
//!     r#"{"startingBalance": 1200, "monthlyPayment": 100, "apr": 0,
//!         "startingMonth": "Jan", "startingYear": 2024}"#,
//! )
//! .unwrap();
//!
//! match run_scenario(spec.kind, &inputs) {
//!     Ok(ScenarioOutcome::Schedule(schedule)) => {
//!         println!("Payments:   {}", schedule.payments.len());
//!         println!("Total paid: {:.2}", schedule.total_paid());
//!     }
//!     Ok(other) => println!("{other:?}"),
//!     Err(e) => eprintln!("Error running scenario: {e}"),
//! }
//! ```

pub mod amortization;
pub mod calendar;
pub mod error;
pub mod formulas;
pub mod observer;
pub mod scenario;
pub mod types;

pub use amortization::{PAYMENT_LIMIT, calc_constant_monthly_loan_payments};
pub use error::CalcError;
pub use formulas::{
    invest_for_missed_opportunity, invest_given_previous_growth, invest_given_target_price,
    invest_potential_investment,
};
pub use observer::{Observer, Silent, TracingObserver};
pub use scenario::{
    InputField, InputShape, ScenarioInputs, ScenarioKind, ScenarioOutcome, ScenarioSpec,
    run_scenario, run_scenario_json, select_scenario,
};
pub use types::*;

pub type CalcResult<T> = Result<T, CalcError>;
