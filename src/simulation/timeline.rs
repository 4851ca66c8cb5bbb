//! Sampled output series for charting.

use crate::core::debt::DebtId;
use crate::core::snapshot::WorkingDebt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decimal places kept in emitted records.
pub const RECORD_DECIMAL_PLACES: u32 = 2;

/// Serialized field names of [`TimelineRecord`] that debt keys may not take.
const RESERVED_KEYS: [&str; 2] = ["month", "totalBalance"];

/// Which months are written to the timeline.
///
/// Every month up to and including `dense_months`, then only months that are
/// a multiple of `stride`. Sampling never changes the simulation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    pub dense_months: u32,
    pub stride: u32,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            dense_months: 12,
            stride: 3,
        }
    }
}

impl SamplingPolicy {
    pub fn should_record(&self, month: u32) -> bool {
        month <= self.dense_months || month % self.stride.max(1) == 0
    }
}

/// One sampled point: every debt's balance and the total at `month`.
///
/// Serializes flat, with one key per debt name:
///
/// ```json
/// { "month": 3, "totalBalance": "1034.50", "Visa": "734.50", "Car": "300.00" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRecord {
    pub month: u32,
    pub total_balance: Decimal,
    #[serde(flatten)]
    pub balances: BTreeMap<String, Decimal>,
}

impl TimelineRecord {
    /// Balance recorded for the debt keyed `name`.
    pub fn balance(&self, name: &str) -> Option<Decimal> {
        self.balances.get(name).copied()
    }
}

/// Accumulates [`TimelineRecord`]s as the driver advances.
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    policy: SamplingPolicy,
    keys: Vec<String>,
    records: Vec<TimelineRecord>,
}

impl TimelineBuilder {
    /// Create a builder for the debts of one run.
    ///
    /// Series keys are the debt names. A name already taken by an earlier
    /// debt, or equal to one of the record's own fields, gets its id
    /// appended, `"Visa (visa-2)"`. If that is taken too, a counter follows.
    pub fn new(policy: SamplingPolicy, debts: &[WorkingDebt]) -> Self {
        let mut keys: Vec<String> = Vec::with_capacity(debts.len());
        for debt in debts {
            let key = unique_key(&keys, &debt.debt().name, &debt.debt().id);
            keys.push(key);
        }
        Self {
            policy,
            keys,
            records: Vec::new(),
        }
    }

    /// Series key for the debt at `index`.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Record the state at `month` if the sampling policy accepts it.
    /// Returns whether a record was appended.
    pub fn record(&mut self, month: u32, debts: &[WorkingDebt]) -> bool {
        if !self.policy.should_record(month) {
            return false;
        }
        let balances = self
            .keys
            .iter()
            .cloned()
            .zip(debts.iter().map(|d| round(d.remaining_balance())))
            .collect();
        let total_balance = round(
            debts
                .iter()
                .filter(|d| !d.is_paid())
                .map(|d| d.remaining_balance())
                .fold(Decimal::ZERO, Decimal::saturating_add),
        );
        self.records.push(TimelineRecord {
            month,
            total_balance,
            balances,
        });
        true
    }

    pub fn records(&self) -> &[TimelineRecord] {
        &self.records
    }

    pub fn finish(self) -> Vec<TimelineRecord> {
        self.records
    }
}

fn unique_key(taken: &[String], name: &str, id: &DebtId) -> String {
    let is_taken = |key: &str| RESERVED_KEYS.contains(&key) || taken.iter().any(|k| k == key);
    if !is_taken(name) {
        return name.to_string();
    }
    let base = format!("{} ({})", name, id);
    let mut key = base.clone();
    let mut n = 2u32;
    while is_taken(&key) {
        key = format!("{} #{}", base, n);
        n += 1;
    }
    key
}

fn round(value: Decimal) -> Decimal {
    value.round_dp(RECORD_DECIMAL_PLACES)
}
