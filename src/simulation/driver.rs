//! Month-by-month payoff projection.

use crate::core::debt::{Debt, DebtId};
use crate::core::snapshot::DebtSnapshot;
use crate::simulation::accrual::{apply_month, OverflowPolicy};
use crate::simulation::timeline::{SamplingPolicy, TimelineBuilder, TimelineRecord};
use crate::strategy::selector::PayoffStrategy;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hard ceiling on simulated months (ten years).
pub const MAX_MONTHS: u32 = 120;

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub strategy: PayoffStrategy,
    /// Monthly amount paid on top of all minimums. Negative values count as zero.
    pub extra_payment: Decimal,
    pub overflow_policy: OverflowPolicy,
    pub sampling: SamplingPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            strategy: PayoffStrategy::default(),
            extra_payment: Decimal::ZERO,
            overflow_policy: OverflowPolicy::default(),
            sampling: SamplingPolicy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(strategy: PayoffStrategy, extra_payment: Decimal) -> Self {
        Self {
            strategy,
            extra_payment,
            ..Default::default()
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every balance reached zero.
    PaidOff,
    /// [`MAX_MONTHS`] elapsed with debt remaining.
    HorizonReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulationPhase {
    Running,
    Terminated(Termination),
}

/// When and at what cost a single debt was retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub id: DebtId,
    pub name: String,
    /// Month the balance reached zero; 0 for debts that started at zero.
    pub month: u32,
    pub interest_paid: Decimal,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffProjection {
    strategy: PayoffStrategy,
    extra_payment: Decimal,
    overflow_policy: OverflowPolicy,
    months_simulated: u32,
    termination: Termination,
    starting_balance: Decimal,
    remaining_balance: Decimal,
    total_interest: Decimal,
    total_paid: Decimal,
    overflow_forfeited: Decimal,
    payoffs: Vec<DebtPayoff>,
    timeline: Vec<TimelineRecord>,
}

impl PayoffProjection {
    pub fn strategy(&self) -> PayoffStrategy {
        self.strategy
    }

    pub fn extra_payment(&self) -> Decimal {
        self.extra_payment
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    /// The sampled series, month 0 first.
    pub fn timeline(&self) -> &[TimelineRecord] {
        &self.timeline
    }

    pub fn into_timeline(self) -> Vec<TimelineRecord> {
        self.timeline
    }

    /// Last month simulated. Not necessarily the last recorded month.
    pub fn months_simulated(&self) -> u32 {
        self.months_simulated
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_paid_off(&self) -> bool {
        self.termination == Termination::PaidOff
    }

    /// Months until every debt is gone, `None` if the horizon was hit first.
    pub fn months_to_payoff(&self) -> Option<u32> {
        self.is_paid_off().then_some(self.months_simulated)
    }

    pub fn starting_balance(&self) -> Decimal {
        self.starting_balance
    }

    /// Balance left when the run stopped, full precision.
    pub fn remaining_balance(&self) -> Decimal {
        self.remaining_balance
    }

    /// Interest charged over the whole run, full precision.
    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    /// Money applied to balances over the whole run.
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Overflow that could not be applied to any debt.
    pub fn overflow_forfeited(&self) -> Decimal {
        self.overflow_forfeited
    }

    /// Debts in the order they were retired. Ties keep input order.
    pub fn payoff_order(&self) -> &[DebtPayoff] {
        &self.payoffs
    }

    /// Calendar date of the final payment, counting `start` as month 0.
    pub fn payoff_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        let months = self.months_to_payoff()?;
        start.checked_add_months(Months::new(months))
    }
}

impl std::fmt::Display for PayoffProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Payoff Projection ({}) ===", self.strategy)?;
        writeln!(f, "Extra Payment:    {}", self.extra_payment)?;
        writeln!(f, "Overflow Policy:  {}", self.overflow_policy)?;
        writeln!(f, "Starting Balance: {}", self.starting_balance.round_dp(2))?;
        match self.months_to_payoff() {
            Some(months) => writeln!(f, "Debt Free In:     {} months", months)?,
            None => writeln!(
                f,
                "Debt Free In:     not within {} months ({} left)",
                MAX_MONTHS,
                self.remaining_balance.round_dp(2)
            )?,
        }
        writeln!(f, "Total Interest:   {}", self.total_interest.round_dp(2))?;
        writeln!(f, "Total Paid:       {}", self.total_paid.round_dp(2))?;

        if !self.payoffs.is_empty() {
            writeln!(f, "\nPayoff Order:")?;
            for (i, payoff) in self.payoffs.iter().enumerate() {
                writeln!(
                    f,
                    "  {}. {:<20} month {:>3}  interest {}",
                    i + 1,
                    payoff.name,
                    payoff.month,
                    payoff.interest_paid.round_dp(2)
                )?;
            }
        }
        Ok(())
    }
}

/// Runs payoff projections for a fixed configuration.
///
/// Each call to [`run`](Self::run) works on a private copy of the debts, so a
/// simulator can be reused and shared freely.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::{Debt, DebtId};
/// use debt_payoff_engine::simulation::driver::{PayoffSimulator, SimulationConfig};
/// use debt_payoff_engine::strategy::selector::PayoffStrategy;
/// use rust_decimal_macros::dec;
///
/// let debts = vec![Debt::new(DebtId::new("card"), "Card", dec!(1200), dec!(12), dec!(100))];
/// let simulator = PayoffSimulator::new(SimulationConfig::new(PayoffStrategy::Avalanche, dec!(0)));
/// let projection = simulator.run(&debts);
///
/// assert_eq!(projection.timeline()[1].total_balance, dec!(1112));
/// assert!(projection.is_paid_off());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Project repayment of `debts` month by month.
    ///
    /// # Algorithm
    ///
    /// 1. Copy and sanitize the debts; record month 0.
    /// 2. While running: advance the month, rank unpaid debts by strategy,
    ///    apply interest and payments, record a sample if the policy allows.
    /// 3. Stop when the total balance reaches zero or at [`MAX_MONTHS`].
    pub fn run(&self, debts: &[Debt]) -> PayoffProjection {
        let config = &self.config;
        let mut extra_payment = config.extra_payment;
        if extra_payment < Decimal::ZERO {
            log::warn!("negative extra payment {} clamped to zero", extra_payment);
            extra_payment = Decimal::ZERO;
        }

        let mut snapshot = DebtSnapshot::from_debts(debts);
        let mut timeline = TimelineBuilder::new(config.sampling, snapshot.debts());
        let starting_balance = snapshot.total_balance();
        let mut month = 0u32;
        let mut total_paid = Decimal::ZERO;
        let mut overflow_forfeited = Decimal::ZERO;

        timeline.record(month, snapshot.debts());
        let mut phase = Self::next_phase(month, starting_balance);

        let termination = loop {
            if let SimulationPhase::Terminated(termination) = phase {
                break termination;
            }

            month += 1;
            let order = config.strategy.priority_order(snapshot.debts());
            let summary = apply_month(
                snapshot.debts_mut(),
                &order,
                extra_payment,
                config.overflow_policy,
                month,
            );
            total_paid = total_paid.saturating_add(summary.payments);
            overflow_forfeited = overflow_forfeited.saturating_add(summary.overflow_forfeited);

            let total_balance = snapshot.total_balance();
            log::trace!(
                "month {}: interest {}, paid {}, balance {}",
                month,
                summary.interest,
                summary.payments,
                total_balance
            );
            timeline.record(month, snapshot.debts());
            phase = Self::next_phase(month, total_balance);
        };
        log::debug!(
            "{} simulation of {} debts ended after {} months: {:?}",
            config.strategy,
            snapshot.len(),
            month,
            termination
        );

        let mut payoffs: Vec<DebtPayoff> = snapshot
            .debts()
            .iter()
            .filter_map(|d| {
                d.paid_off_month().map(|m| DebtPayoff {
                    id: d.debt().id.clone(),
                    name: d.debt().name.clone(),
                    month: m,
                    interest_paid: d.interest_accrued(),
                })
            })
            .collect();
        payoffs.sort_by_key(|p| p.month);

        PayoffProjection {
            strategy: config.strategy,
            extra_payment,
            overflow_policy: config.overflow_policy,
            months_simulated: month,
            termination,
            starting_balance,
            remaining_balance: snapshot.total_balance(),
            total_interest: snapshot.total_interest(),
            total_paid,
            overflow_forfeited,
            payoffs,
            timeline: timeline.finish(),
        }
    }

    fn next_phase(month: u32, total_balance: Decimal) -> SimulationPhase {
        if total_balance <= Decimal::ZERO {
            SimulationPhase::Terminated(Termination::PaidOff)
        } else if month >= MAX_MONTHS {
            SimulationPhase::Terminated(Termination::HorizonReached)
        } else {
            SimulationPhase::Running
        }
    }
}

/// Run the default simulation and return only the timeline.
pub fn simulate(
    debts: &[Debt],
    strategy: PayoffStrategy,
    extra_payment: Decimal,
) -> Vec<TimelineRecord> {
    PayoffSimulator::new(SimulationConfig::new(strategy, extra_payment))
        .run(debts)
        .into_timeline()
}
