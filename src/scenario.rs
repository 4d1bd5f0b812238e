//! Scenario registry: which formula a menu choice runs and which inputs it
//! needs.
//!
//! Each scenario's formula adapter reads its inputs only through the
//! `ScenarioInputs::require_*` accessors, for exactly the fields listed in its
//! [`ScenarioSpec::inputs`]. The tests below check that the two stay in step.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::calc_constant_monthly_loan_payments;
use crate::calendar::parse_month;
use crate::error::CalcError;
use crate::formulas::{
    invest_for_missed_opportunity, invest_given_previous_growth, invest_given_target_price,
    invest_potential_investment,
};
use crate::observer::{Observer, Silent, TracingObserver};
use crate::types::{AmortizationSchedule, InvestmentValue, Suggestion};
use crate::CalcResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    PreviousGrowth,
    TargetPrice,
    MissedInvestment,
    PotentialInvestment,
    ConstantLoanPayment,
}

impl ScenarioKind {
    /// In menu order.
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::PreviousGrowth,
        ScenarioKind::TargetPrice,
        ScenarioKind::MissedInvestment,
        ScenarioKind::PotentialInvestment,
        ScenarioKind::ConstantLoanPayment,
    ];
}

impl TryFrom<u8> for ScenarioKind {
    type Error = CalcError;

    /// Menu numbers start at 1.
    fn try_from(index: u8) -> Result<Self, Self::Error> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| CalcError::InvalidScenario(format!("no scenario number {index}")))
    }
}

impl FromStr for ScenarioKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        if let Ok(index) = key.parse::<u8>() {
            return Self::try_from(index);
        }

        match key.as_str() {
            "previousgrowth" => Ok(ScenarioKind::PreviousGrowth),
            "targetprice" => Ok(ScenarioKind::TargetPrice),
            "missedinvestment" => Ok(ScenarioKind::MissedInvestment),
            "potentialinvestment" => Ok(ScenarioKind::PotentialInvestment),
            "constantloanpayment" => Ok(ScenarioKind::ConstantLoanPayment),
            _ => Err(CalcError::InvalidScenario(format!("unknown scenario '{s}'"))),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(select_scenario(*self).title)
    }
}

/// Every input any scenario can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    CurrentPrice,
    OldPrice,
    TargetPrice,
    TargetBalance,
    IntendedInvestmentAmount,
    PricePaid,
    PriceNow,
    NextPrices,
    StartingBalance,
    MonthlyPayment,
    Apr,
    StartingMonth,
    StartingYear,
    Verbose,
}

/// The kind of value the input collector has to produce for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    Real,
    RealSequence,
    MonthToken,
    Year,
    Flag,
}

impl InputField {
    /// Key used in the inputs mapping.
    pub fn name(self) -> &'static str {
        match self {
            InputField::CurrentPrice => "currentPrice",
            InputField::OldPrice => "oldPrice",
            InputField::TargetPrice => "targetPrice",
            InputField::TargetBalance => "targetBalance",
            InputField::IntendedInvestmentAmount => "intendedInvestmentAmount",
            InputField::PricePaid => "pricePaid",
            InputField::PriceNow => "priceNow",
            InputField::NextPrices => "nextPrices",
            InputField::StartingBalance => "startingBalance",
            InputField::MonthlyPayment => "monthlyPayment",
            InputField::Apr => "apr",
            InputField::StartingMonth => "startingMonth",
            InputField::StartingYear => "startingYear",
            InputField::Verbose => "verbose",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            InputField::CurrentPrice => "Current price",
            InputField::OldPrice => "Old price",
            InputField::TargetPrice => "Target price",
            InputField::TargetBalance => "Target balance",
            InputField::IntendedInvestmentAmount => "Amount to invest",
            InputField::PricePaid => "Price you would have paid",
            InputField::PriceNow => "Price now",
            InputField::NextPrices => "Possible future prices (comma separated)",
            InputField::StartingBalance => "Loan balance",
            InputField::MonthlyPayment => "Monthly payment",
            InputField::Apr => "APR (%)",
            InputField::StartingMonth => "First payment month",
            InputField::StartingYear => "First payment year",
            InputField::Verbose => "Show working",
        }
    }

    pub fn shape(self) -> InputShape {
        match self {
            InputField::NextPrices => InputShape::RealSequence,
            InputField::StartingMonth => InputShape::MonthToken,
            InputField::StartingYear => InputShape::Year,
            InputField::Verbose => InputShape::Flag,
            _ => InputShape::Real,
        }
    }

    /// Optional fields are never prompted for.
    pub fn is_optional(self) -> bool {
        self == InputField::Verbose
    }
}

/// Values gathered for a scenario, keyed by [`InputField::name`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioInputs {
    pub current_price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub target_balance: Option<Decimal>,
    pub intended_investment_amount: Option<Decimal>,
    pub price_paid: Option<Decimal>,
    pub price_now: Option<Decimal>,
    pub next_prices: Option<Vec<Decimal>>,
    pub starting_balance: Option<Decimal>,
    pub monthly_payment: Option<Decimal>,
    pub apr: Option<Decimal>,
    /// Month number, abbreviation or name.
    pub starting_month: Option<String>,
    pub starting_year: Option<i32>,
    #[serde(default)]
    pub verbose: bool,
}

impl ScenarioInputs {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn require_real(&self, field: InputField) -> CalcResult<Decimal> {
        let value = match field {
            InputField::CurrentPrice => self.current_price,
            InputField::OldPrice => self.old_price,
            InputField::TargetPrice => self.target_price,
            InputField::TargetBalance => self.target_balance,
            InputField::IntendedInvestmentAmount => self.intended_investment_amount,
            InputField::PricePaid => self.price_paid,
            InputField::PriceNow => self.price_now,
            InputField::StartingBalance => self.starting_balance,
            InputField::MonthlyPayment => self.monthly_payment,
            InputField::Apr => self.apr,
            other => return Err(wrong_shape(other, InputShape::Real)),
        };
        value.ok_or(CalcError::MissingInput(field))
    }

    pub fn require_reals(&self, field: InputField) -> CalcResult<&[Decimal]> {
        match field {
            InputField::NextPrices => self
                .next_prices
                .as_deref()
                .ok_or(CalcError::MissingInput(field)),
            other => Err(wrong_shape(other, InputShape::RealSequence)),
        }
    }

    /// Parses the month token into 1-12.
    pub fn require_month(&self, field: InputField) -> CalcResult<u32> {
        match field {
            InputField::StartingMonth => self
                .starting_month
                .as_deref()
                .ok_or(CalcError::MissingInput(field))
                .and_then(parse_month),
            other => Err(wrong_shape(other, InputShape::MonthToken)),
        }
    }

    pub fn require_year(&self, field: InputField) -> CalcResult<i32> {
        match field {
            InputField::StartingYear => self.starting_year.ok_or(CalcError::MissingInput(field)),
            other => Err(wrong_shape(other, InputShape::Year)),
        }
    }
}

fn wrong_shape(field: InputField, asked: InputShape) -> CalcError {
    CalcError::InvalidInput {
        field: field.name().into(),
        reason: format!("is {:?}, not {asked:?}", field.shape()),
    }
}

/// Result of running any scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "camelCase")]
pub enum ScenarioOutcome {
    Suggestion(Suggestion),
    Value(InvestmentValue),
    Values(Vec<InvestmentValue>),
    Schedule(AmortizationSchedule),
}

pub type Formula = fn(&ScenarioInputs, &dyn Observer) -> CalcResult<ScenarioOutcome>;

#[derive(Debug, Clone, Copy)]
pub struct ScenarioSpec {
    pub kind: ScenarioKind,
    pub title: &'static str,
    pub formula: Formula,
    /// Everything the formula reads, `verbose` included.
    pub inputs: &'static [InputField],
}

impl ScenarioSpec {
    /// Inputs the collector has to ask the user for.
    pub fn prompted_inputs(&self) -> impl Iterator<Item = InputField> + '_ {
        self.inputs.iter().copied().filter(|f| !f.is_optional())
    }
}

pub fn select_scenario(kind: ScenarioKind) -> ScenarioSpec {
    use InputField::*;

    match kind {
        ScenarioKind::PreviousGrowth => ScenarioSpec {
            kind,
            title: "Invest given previous growth",
            formula: previous_growth,
            inputs: &[CurrentPrice, OldPrice, TargetBalance, Verbose],
        },
        ScenarioKind::TargetPrice => ScenarioSpec {
            kind,
            title: "Invest given target price",
            formula: target_price,
            inputs: &[CurrentPrice, TargetPrice, TargetBalance, Verbose],
        },
        ScenarioKind::MissedInvestment => ScenarioSpec {
            kind,
            title: "Missed investment",
            formula: missed_investment,
            inputs: &[IntendedInvestmentAmount, PriceNow, PricePaid, Verbose],
        },
        ScenarioKind::PotentialInvestment => ScenarioSpec {
            kind,
            title: "Potential investment",
            formula: potential_investment,
            inputs: &[IntendedInvestmentAmount, CurrentPrice, NextPrices, Verbose],
        },
        ScenarioKind::ConstantLoanPayment => ScenarioSpec {
            kind,
            title: "Constant monthly loan payments",
            formula: constant_loan_payment,
            inputs: &[
                StartingBalance,
                MonthlyPayment,
                Apr,
                StartingMonth,
                StartingYear,
                Verbose,
            ],
        },
    }
}

/// Runs `kind` with `inputs`, logging the working through `tracing` when
/// `inputs.verbose` is set.
pub fn run_scenario(kind: ScenarioKind, inputs: &ScenarioInputs) -> CalcResult<ScenarioOutcome> {
    let spec = select_scenario(kind);
    tracing::info!(scenario = ?kind, "running {}", spec.title);

    if inputs.verbose {
        (spec.formula)(inputs, &TracingObserver)
    } else {
        (spec.formula)(inputs, &Silent)
    }
}

/// Parses a scenario name or menu number and a JSON inputs object, then runs
/// it. A `CalcError` stays reachable through `downcast_ref`.
pub fn run_scenario_json(scenario: &str, inputs_json: &str) -> anyhow::Result<ScenarioOutcome> {
    let kind: ScenarioKind = scenario.parse()?;
    let inputs = ScenarioInputs::from_json(inputs_json)
        .with_context(|| format!("parsing inputs for scenario {kind:?}"))?;

    Ok(run_scenario(kind, &inputs)?)
}

fn previous_growth(inputs: &ScenarioInputs, observer: &dyn Observer) -> CalcResult<ScenarioOutcome> {
    invest_given_previous_growth(
        inputs.require_real(InputField::CurrentPrice)?,
        inputs.require_real(InputField::OldPrice)?,
        inputs.require_real(InputField::TargetBalance)?,
        observer,
    )
    .map(ScenarioOutcome::Suggestion)
}

fn target_price(inputs: &ScenarioInputs, observer: &dyn Observer) -> CalcResult<ScenarioOutcome> {
    invest_given_target_price(
        inputs.require_real(InputField::CurrentPrice)?,
        inputs.require_real(InputField::TargetPrice)?,
        inputs.require_real(InputField::TargetBalance)?,
        observer,
    )
    .map(ScenarioOutcome::Suggestion)
}

fn missed_investment(inputs: &ScenarioInputs, observer: &dyn Observer) -> CalcResult<ScenarioOutcome> {
    invest_for_missed_opportunity(
        inputs.require_real(InputField::IntendedInvestmentAmount)?,
        inputs.require_real(InputField::PriceNow)?,
        inputs.require_real(InputField::PricePaid)?,
        observer,
    )
    .map(ScenarioOutcome::Value)
}

fn potential_investment(
    inputs: &ScenarioInputs,
    observer: &dyn Observer,
) -> CalcResult<ScenarioOutcome> {
    invest_potential_investment(
        inputs.require_real(InputField::IntendedInvestmentAmount)?,
        inputs.require_real(InputField::CurrentPrice)?,
        inputs.require_reals(InputField::NextPrices)?,
        observer,
    )
    .map(ScenarioOutcome::Values)
}

fn constant_loan_payment(
    inputs: &ScenarioInputs,
    observer: &dyn Observer,
) -> CalcResult<ScenarioOutcome> {
    calc_constant_monthly_loan_payments(
        inputs.require_real(InputField::StartingBalance)?,
        inputs.require_real(InputField::MonthlyPayment)?,
        inputs.require_real(InputField::Apr)?,
        inputs.require_month(InputField::StartingMonth)?,
        inputs.require_year(InputField::StartingYear)?,
        observer,
    )
    .map(ScenarioOutcome::Schedule)
}
