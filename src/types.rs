use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decimal places used for every amount shown in an amortization row.
pub const DISPLAY_DP: u32 = 2;

/// Records whose fields a generic table renderer can enumerate.
///
/// `cells` always yields one entry per name in `COLUMNS`, in the same order.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// How many shares to buy now so that holding them at a given price is
/// worth the target balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSuggestion {
    /// Shares to buy.
    pub shares_to_buy: Decimal,
    /// Cost of those shares at the current price.
    pub investment_value: Decimal,
    /// The target or projected price the balance is reached at.
    pub will_reach_target_balance_at_price: Decimal,
    pub current_price: Decimal,
    pub target_balance: Decimal,
}

/// Result of the share-sizing formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Suggestion {
    Computed(InvestmentSuggestion),
    /// The price the balance would be reached at is zero.
    NotComputable,
}

impl Suggestion {
    pub fn computed(&self) -> Option<&InvestmentSuggestion> {
        match self {
            Suggestion::Computed(suggestion) => Some(suggestion),
            Suggestion::NotComputable => None,
        }
    }

    pub fn is_computable(&self) -> bool {
        matches!(self, Suggestion::Computed(_))
    }

    /// Record to display, using -1 in every field when there is no answer.
    pub fn sentinel_record(&self) -> InvestmentSuggestion {
        match self {
            Suggestion::Computed(suggestion) => suggestion.clone(),
            Suggestion::NotComputable => InvestmentSuggestion {
                shares_to_buy: dec!(-1),
                investment_value: dec!(-1),
                will_reach_target_balance_at_price: dec!(-1),
                current_price: dec!(-1),
                target_balance: dec!(-1),
            },
        }
    }
}

/// What a fixed investment bought at `price` is worth at `next_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentValue {
    pub initial_investment: Decimal,
    /// Price paid per share.
    pub price: Decimal,
    pub shares: Decimal,
    pub next_price: Decimal,
    /// `shares * next_price`
    pub value: Decimal,
    /// `value - initial_investment`
    pub profit: Decimal,
}

/// One month of a constant-payment loan schedule. Amounts are rounded to
/// [`DISPLAY_DP`] places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingMonthlyPayment {
    /// 1-based.
    pub payment_number: u32,
    pub month_and_year: String,
    /// Balance before this payment.
    pub remaining_balance: Decimal,
    /// Amount actually paid, never more than the remaining balance.
    pub monthly_payment: Decimal,
    pub balance_after_payment: Decimal,
    /// Carried into the next row as its remaining balance.
    pub balance_after_payment_plus_interest: Decimal,
}

/// Emitted when a schedule is cut off at the payment limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapReached {
    pub limit: u32,
    pub years: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub payments: Vec<RemainingMonthlyPayment>,
    /// Set when the loan was not paid off within the payment limit. The
    /// payments computed so far are still returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_reached: Option<CapReached>,
}

impl AmortizationSchedule {
    pub fn is_complete(&self) -> bool {
        self.cap_reached.is_none()
    }

    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.monthly_payment).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.payments
            .iter()
            .map(|p| p.balance_after_payment_plus_interest - p.balance_after_payment)
            .sum()
    }
}

impl Tabular for InvestmentSuggestion {
    const COLUMNS: &'static [&'static str] = &[
        "shares_to_buy",
        "investment_value",
        "will_reach_target_balance_at_price",
        "current_price",
        "target_balance",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.shares_to_buy.to_string(),
            self.investment_value.to_string(),
            self.will_reach_target_balance_at_price.to_string(),
            self.current_price.to_string(),
            self.target_balance.to_string(),
        ]
    }
}

impl Tabular for InvestmentValue {
    const COLUMNS: &'static [&'static str] = &[
        "initial_investment",
        "price",
        "shares",
        "next_price",
        "value",
        "profit",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.initial_investment.to_string(),
            self.price.to_string(),
            self.shares.to_string(),
            self.next_price.to_string(),
            self.value.to_string(),
            self.profit.to_string(),
        ]
    }
}

impl Tabular for RemainingMonthlyPayment {
    const COLUMNS: &'static [&'static str] = &[
        "payment_number",
        "month_and_year",
        "remaining_balance",
        "monthly_payment",
        "balance_after_payment",
        "balance_after_payment_plus_interest",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.payment_number.to_string(),
            self.month_and_year.clone(),
            self.remaining_balance.to_string(),
            self.monthly_payment.to_string(),
            self.balance_after_payment.to_string(),
            self.balance_after_payment_plus_interest.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_record_is_all_minus_one() {
        let record = Suggestion::NotComputable.sentinel_record();

        assert!(!Suggestion::NotComputable.is_computable());
        assert_eq!(record.shares_to_buy, dec!(-1));
        assert_eq!(record.investment_value, dec!(-1));
        assert_eq!(record.will_reach_target_balance_at_price, dec!(-1));
        assert_eq!(record.current_price, dec!(-1));
        assert_eq!(record.target_balance, dec!(-1));
    }

    #[test]
    fn test_cells_match_columns() {
        let suggestion = Suggestion::NotComputable.sentinel_record();
        assert_eq!(suggestion.cells().len(), InvestmentSuggestion::COLUMNS.len());

        let value = InvestmentValue {
            initial_investment: dec!(100),
            price: dec!(2),
            shares: dec!(50),
            next_price: dec!(3),
            value: dec!(150),
            profit: dec!(50),
        };
        assert_eq!(value.cells().len(), InvestmentValue::COLUMNS.len());

        let payment = RemainingMonthlyPayment {
            payment_number: 1,
            month_and_year: "Jan-2024".into(),
            remaining_balance: dec!(100),
            monthly_payment: dec!(10),
            balance_after_payment: dec!(90),
            balance_after_payment_plus_interest: dec!(90.9),
        };
        assert_eq!(payment.cells().len(), RemainingMonthlyPayment::COLUMNS.len());
        assert_eq!(payment.cells()[1], "Jan-2024");
    }

    #[test]
    fn test_schedule_aggregates() {
        let row = |n: u32, before: Decimal, paid: Decimal, after_interest: Decimal| {
            RemainingMonthlyPayment {
                payment_number: n,
                month_and_year: String::new(),
                remaining_balance: before,
                monthly_payment: paid,
                balance_after_payment: before - paid,
                balance_after_payment_plus_interest: after_interest,
            }
        };
        let schedule = AmortizationSchedule {
            payments: vec![
                row(1, dec!(200), dec!(100), dec!(101)),
                row(2, dec!(101), dec!(100), dec!(1.01)),
                row(3, dec!(1.01), dec!(1.01), dec!(0)),
            ],
            cap_reached: None,
        };

        assert!(schedule.is_complete());
        assert_eq!(schedule.total_paid(), dec!(201.01));
        assert_eq!(schedule.total_interest(), dec!(1.01));
    }
}
