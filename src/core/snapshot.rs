use crate::core::debt::Debt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A debt as it evolves inside one simulation run.
///
/// Holds a sanitized copy of the caller's [`Debt`]; nothing here points back
/// at the caller's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDebt {
    debt: Debt,
    remaining_balance: Decimal,
    paid: bool,
    interest_accrued: Decimal,
    paid_off_month: Option<u32>,
}

impl WorkingDebt {
    pub fn new(debt: &Debt) -> Self {
        let debt = debt.sanitized();
        let remaining_balance = debt.balance;
        let paid = remaining_balance == Decimal::ZERO;
        Self {
            debt,
            remaining_balance,
            paid,
            interest_accrued: Decimal::ZERO,
            paid_off_month: if paid { Some(0) } else { None },
        }
    }

    pub fn debt(&self) -> &Debt {
        &self.debt
    }

    pub fn remaining_balance(&self) -> Decimal {
        self.remaining_balance
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// Interest charged over the run so far.
    pub fn interest_accrued(&self) -> Decimal {
        self.interest_accrued
    }

    /// Month in which the balance reached zero, `Some(0)` if it started at zero.
    pub fn paid_off_month(&self) -> Option<u32> {
        self.paid_off_month
    }

    /// Interest for one month on the current balance. Zero once paid.
    ///
    /// Saturates at `Decimal::MAX` when a balance compounds past the
    /// representable range.
    pub fn monthly_interest(&self) -> Decimal {
        if self.paid {
            return Decimal::ZERO;
        }
        self.remaining_balance.saturating_mul(self.debt.monthly_rate())
    }

    pub(crate) fn accrue(&mut self, interest: Decimal) {
        self.interest_accrued = self.interest_accrued.saturating_add(interest);
    }

    /// Set the new balance, clamped at zero. Marks the debt paid when it hits zero.
    pub(crate) fn set_balance(&mut self, balance: Decimal, month: u32) {
        self.remaining_balance = balance.max(Decimal::ZERO);
        if self.remaining_balance == Decimal::ZERO && !self.paid {
            self.paid = true;
            self.paid_off_month = Some(month);
            log::debug!("debt '{}' paid off in month {}", self.debt.id, month);
        }
    }
}

/// Private per-run copy of the caller's debts, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtSnapshot {
    debts: Vec<WorkingDebt>,
}

impl DebtSnapshot {
    pub fn from_debts(debts: &[Debt]) -> Self {
        Self {
            debts: debts.iter().map(WorkingDebt::new).collect(),
        }
    }

    pub fn debts(&self) -> &[WorkingDebt] {
        &self.debts
    }

    pub fn debts_mut(&mut self) -> &mut [WorkingDebt] {
        &mut self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Sum of remaining balances over unpaid debts.
    pub fn total_balance(&self) -> Decimal {
        self.debts
            .iter()
            .filter(|d| !d.is_paid())
            .map(|d| d.remaining_balance())
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of interest charged across all debts.
    pub fn total_interest(&self) -> Decimal {
        self.debts
            .iter()
            .map(|d| d.interest_accrued())
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn all_paid(&self) -> bool {
        self.debts.iter().all(|d| d.is_paid())
    }
}
