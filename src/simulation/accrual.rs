//! One month of interest and payments.

use crate::core::debt::DebtError;
use crate::core::snapshot::WorkingDebt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to the part of the priority debt's payment that exceeds what
/// it owed in the month it is retired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Apply it in the same month to the remaining unpaid debts, in priority order.
    #[default]
    Cascade,
    /// Drop it. The next month's pool is unaffected.
    Forfeit,
}

impl OverflowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Cascade => "cascade",
            OverflowPolicy::Forfeit => "forfeit",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(OverflowPolicy::Cascade),
            "forfeit" => Ok(OverflowPolicy::Forfeit),
            _ => Err(DebtError::UnknownOverflowPolicy(s.to_string())),
        }
    }
}

/// Totals for one simulated month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Interest charged across all open debts.
    pub interest: Decimal,
    /// Money actually applied to balances, overflow included.
    pub payments: Decimal,
    /// Overflow redirected to other debts this month.
    pub overflow_applied: Decimal,
    /// Overflow that found no debt to pay.
    pub overflow_forfeited: Decimal,
}

/// Apply one month of interest and payments to every unpaid debt.
///
/// `order` is this month's priority ranking (see
/// [`PayoffStrategy::priority_order`](crate::strategy::selector::PayoffStrategy::priority_order));
/// `order[0]` receives the whole `extra_pool` on top of its minimum payment.
/// Debts are processed in input order. Once every debt has been charged and
/// paid, any overflow from the priority debt is handled per `policy`.
///
/// Amounts saturate at `Decimal::MAX`, so a balance compounding without bound
/// stalls at the ceiling instead of overflowing.
pub fn apply_month(
    debts: &mut [WorkingDebt],
    order: &[usize],
    extra_pool: Decimal,
    policy: OverflowPolicy,
    month: u32,
) -> MonthSummary {
    let mut summary = MonthSummary::default();
    let priority = order.first().copied();
    let extra_pool = extra_pool.max(Decimal::ZERO);
    let mut overflow = Decimal::ZERO;

    for (index, debt) in debts.iter_mut().enumerate() {
        if debt.is_paid() {
            continue;
        }

        let interest = debt.monthly_interest();
        let owed = debt.remaining_balance().saturating_add(interest);
        let mut payment = debt.debt().minimum_payment;
        if priority == Some(index) {
            payment = payment.saturating_add(extra_pool);
            if payment > owed {
                overflow = payment - owed;
            }
        }

        debt.accrue(interest);
        debt.set_balance(owed - payment, month);

        summary.interest = summary.interest.saturating_add(interest);
        summary.payments = summary.payments.saturating_add(payment.min(owed));
    }

    if overflow > Decimal::ZERO {
        match policy {
            OverflowPolicy::Cascade => {
                for &index in order.iter().skip(1) {
                    if overflow == Decimal::ZERO {
                        break;
                    }
                    let debt = &mut debts[index];
                    if debt.is_paid() {
                        continue;
                    }
                    let applied = overflow.min(debt.remaining_balance());
                    debt.set_balance(debt.remaining_balance() - applied, month);
                    overflow -= applied;
                    summary.overflow_applied += applied;
                    summary.payments = summary.payments.saturating_add(applied);
                }
                summary.overflow_forfeited = overflow;
            }
            OverflowPolicy::Forfeit => summary.overflow_forfeited = overflow,
        }
    }

    summary
}
