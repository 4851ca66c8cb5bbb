use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque identifier for a debt.
///
/// The engine never interprets the contents; it only carries the id through
/// to payoff reports so callers can map results back to their own records.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::DebtId;
///
/// let card = DebtId::new("visa-01");
/// let loan = DebtId::new("auto-loan");
/// assert_ne!(card, loan);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors raised while turning caller input into engine values.
///
/// The simulation itself is total and never returns these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DebtError {
    #[error("unknown payoff strategy '{0}', expected 'avalanche' or 'snowball'")]
    UnknownStrategy(String),
    #[error("unknown overflow policy '{0}', expected 'cascade' or 'forfeit'")]
    UnknownOverflowPolicy(String),
    #[error("invalid {field} amount '{value}'")]
    InvalidAmount { field: &'static str, value: String },
}

/// Parse a decimal amount, tagging failures with the field they came from.
pub fn parse_amount(field: &'static str, value: &str) -> Result<Decimal, DebtError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| DebtError::InvalidAmount {
            field,
            value: value.to_string(),
        })
}

/// One liability as supplied by the caller.
///
/// `interest_rate` is an annual percentage (`dec!(18)` means 18% APR) and
/// `minimum_payment` is a fixed monthly amount.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::{Debt, DebtId};
/// use rust_decimal_macros::dec;
///
/// let card = Debt::new(DebtId::new("visa"), "Visa", dec!(2500), dec!(19.99), dec!(75));
/// assert_eq!(card.monthly_rate(), dec!(19.99) / dec!(100) / dec!(12));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    /// Principal outstanding.
    pub balance: Decimal,
    /// Annual percentage rate.
    #[serde(default)]
    pub interest_rate: Decimal,
    /// Fixed payment made every month the debt is open.
    #[serde(default)]
    pub minimum_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: DebtId,
        name: impl Into<String>,
        balance: Decimal,
        interest_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
        }
    }

    /// Build a debt from floating point inputs.
    ///
    /// NaN and infinite values become zero.
    pub fn from_f64(
        id: DebtId,
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self::new(
            id,
            name,
            decimal_from_f64(balance),
            decimal_from_f64(interest_rate),
            decimal_from_f64(minimum_payment),
        )
    }

    /// Monthly periodic rate, `interest_rate / 100 / 12`.
    pub fn monthly_rate(&self) -> Decimal {
        self.interest_rate / Decimal::ONE_HUNDRED / Decimal::from(12)
    }

    /// Copy of this debt with every negative amount clamped to zero.
    pub fn sanitized(&self) -> Debt {
        let clamped = Debt {
            id: self.id.clone(),
            name: self.name.clone(),
            balance: self.balance.max(Decimal::ZERO),
            interest_rate: self.interest_rate.max(Decimal::ZERO),
            minimum_payment: self.minimum_payment.max(Decimal::ZERO),
        };
        if clamped != *self {
            log::warn!(
                "debt '{}' has negative amounts, clamped to zero (balance {}, rate {}, minimum {})",
                self.id,
                self.balance,
                self.interest_rate,
                self.minimum_payment
            );
        }
        clamped
    }
}

fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// An ordered collection of debts submitted to the simulator.
///
/// Order matters: it is the accrual order and breaks strategy ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtPortfolio {
    debts: Vec<Debt>,
}

impl DebtPortfolio {
    pub fn new() -> Self {
        Self { debts: Vec::new() }
    }

    pub fn add(&mut self, debt: Debt) {
        self.debts.push(debt);
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Sum of all outstanding balances.
    pub fn total_balance(&self) -> Decimal {
        self.debts
            .iter()
            .map(|d| d.balance)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of all minimum payments, the monthly floor the caller commits to.
    pub fn total_minimum_payment(&self) -> Decimal {
        self.debts
            .iter()
            .map(|d| d.minimum_payment)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

impl FromIterator<Debt> for DebtPortfolio {
    fn from_iter<T: IntoIterator<Item = Debt>>(iter: T) -> Self {
        Self {
            debts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card() -> Debt {
        Debt::new(DebtId::new("card"), "Card", dec!(1200), dec!(12), dec!(100))
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(card().monthly_rate(), dec!(0.01));
    }

    #[test]
    fn test_sanitized_clamps_negatives() {
        let debt = Debt::new(DebtId::new("x"), "X", dec!(-5), dec!(-1), dec!(-10));
        let clean = debt.sanitized();
        assert_eq!(clean.balance, Decimal::ZERO);
        assert_eq!(clean.interest_rate, Decimal::ZERO);
        assert_eq!(clean.minimum_payment, Decimal::ZERO);
        // The input is untouched.
        assert_eq!(debt.balance, dec!(-5));
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        assert_eq!(card().sanitized(), card());
    }

    #[test]
    fn test_from_f64_non_finite_becomes_zero() {
        let debt = Debt::from_f64(DebtId::new("x"), "X", f64::NAN, f64::INFINITY, 25.5);
        assert_eq!(debt.balance, Decimal::ZERO);
        assert_eq!(debt.interest_rate, Decimal::ZERO);
        assert_eq!(debt.minimum_payment, dec!(25.5));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("extra", " 150.25 "), Ok(dec!(150.25)));
        assert_eq!(
            parse_amount("extra", "lots"),
            Err(DebtError::InvalidAmount {
                field: "extra",
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_portfolio_totals() {
        let mut portfolio = DebtPortfolio::new();
        portfolio.add(card());
        portfolio.add(Debt::new(DebtId::new("car"), "Car", dec!(800), dec!(5), dec!(40)));
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.total_balance(), dec!(2000));
        assert_eq!(portfolio.total_minimum_payment(), dec!(140));
    }

    #[test]
    fn test_debt_json_uses_camel_case() {
        let json = serde_json::to_value(card()).unwrap();
        assert_eq!(json["id"], "card");
        assert!(json.get("interestRate").is_some());
        assert!(json.get("minimumPayment").is_some());
    }

    #[test]
    fn test_debt_json_accepts_numbers() {
        let debt: Debt = serde_json::from_str(
            r#"{"id":"a","name":"A","balance":1000,"interestRate":"19.5","minimumPayment":35}"#,
        )
        .unwrap();
        assert_eq!(debt.balance, dec!(1000));
        assert_eq!(debt.interest_rate, dec!(19.5));
        assert_eq!(debt.minimum_payment, dec!(35));
    }
}
