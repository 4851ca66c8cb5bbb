use crate::core::debt::{DebtError, DebtId};
use crate::core::snapshot::WorkingDebt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which debt receives the extra payment each month.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::strategy::selector::PayoffStrategy;
///
/// let strategy: PayoffStrategy = "Snowball".parse().unwrap();
/// assert_eq!(strategy, PayoffStrategy::Snowball);
/// assert_eq!(strategy.to_string(), "snowball");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first.
    #[default]
    Avalanche,
    /// Smallest remaining balance first.
    Snowball,
}

impl PayoffStrategy {
    pub const ALL: [PayoffStrategy; 2] = [PayoffStrategy::Avalanche, PayoffStrategy::Snowball];

    /// Rank the unpaid debts for this month.
    ///
    /// Returns positions into `debts`; element 0 is the priority debt. Paid
    /// debts are left out. The sort is stable, so ties keep input order.
    pub fn priority_order(&self, debts: &[WorkingDebt]) -> Vec<usize> {
        let mut order: Vec<usize> = debts
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_paid())
            .map(|(i, _)| i)
            .collect();

        match self {
            PayoffStrategy::Avalanche => order.sort_by(|&a, &b| {
                debts[b]
                    .debt()
                    .interest_rate
                    .cmp(&debts[a].debt().interest_rate)
            }),
            PayoffStrategy::Snowball => order.sort_by(|&a, &b| {
                debts[a]
                    .remaining_balance()
                    .cmp(&debts[b].remaining_balance())
            }),
        }
        order
    }

    /// Same ranking as [`priority_order`](Self::priority_order), as debt ids.
    pub fn priority_ids(&self, debts: &[WorkingDebt]) -> Vec<DebtId> {
        self.priority_order(debts)
            .into_iter()
            .map(|i| debts[i].debt().id.clone())
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoffStrategy {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(PayoffStrategy::Avalanche),
            "snowball" => Ok(PayoffStrategy::Snowball),
            _ => Err(DebtError::UnknownStrategy(s.to_string())),
        }
    }
}
