use crate::core::debt::Debt;
use crate::simulation::driver::{PayoffProjection, PayoffSimulator, SimulationConfig};
use crate::strategy::selector::PayoffStrategy;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Avalanche and snowball projections for the same debts and budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffProjection,
    pub snowball: PayoffProjection,
}

/// Run both strategies with `base`'s extra payment, overflow policy and sampling.
/// The strategy in `base` is ignored.
pub fn compare_strategies(debts: &[Debt], base: &SimulationConfig) -> StrategyComparison {
    let run = |strategy: PayoffStrategy| {
        PayoffSimulator::new(SimulationConfig {
            strategy,
            ..base.clone()
        })
        .run(debts)
    };
    StrategyComparison {
        avalanche: run(PayoffStrategy::Avalanche),
        snowball: run(PayoffStrategy::Snowball),
    }
}

impl StrategyComparison {
    pub fn projection(&self, strategy: PayoffStrategy) -> &PayoffProjection {
        match strategy {
            PayoffStrategy::Avalanche => &self.avalanche,
            PayoffStrategy::Snowball => &self.snowball,
        }
    }

    /// Snowball interest minus avalanche interest.
    pub fn interest_saved_by_avalanche(&self) -> Decimal {
        self.snowball.total_interest() - self.avalanche.total_interest()
    }

    /// Interest saved as a fraction of snowball's interest.
    pub fn interest_saved_ratio(&self) -> f64 {
        let snowball = self.snowball.total_interest();
        if snowball == Decimal::ZERO {
            return 0.0;
        }
        (self.interest_saved_by_avalanche() / snowball)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Snowball payoff months minus avalanche payoff months. `None` unless
    /// both strategies clear every debt within the horizon.
    pub fn months_saved_by_avalanche(&self) -> Option<i64> {
        let avalanche = self.avalanche.months_to_payoff()?;
        let snowball = self.snowball.months_to_payoff()?;
        Some(i64::from(snowball) - i64::from(avalanche))
    }

    /// The cheaper strategy. Equal interest falls back to the remaining
    /// balance, then to months, and finally to avalanche.
    pub fn recommended(&self) -> PayoffStrategy {
        let key = |p: &PayoffProjection| {
            (
                p.total_interest().saturating_add(p.remaining_balance()),
                p.months_simulated(),
            )
        };
        if key(&self.snowball) < key(&self.avalanche) {
            PayoffStrategy::Snowball
        } else {
            PayoffStrategy::Avalanche
        }
    }
}

impl std::fmt::Display for StrategyComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Strategy Comparison ===")?;
        writeln!(f, "{:<12} {:>10} {:>16}", "Strategy", "Months", "Interest")?;
        for strategy in PayoffStrategy::ALL {
            let p = self.projection(strategy);
            let months = match p.months_to_payoff() {
                Some(m) => m.to_string(),
                None => format!(">{}", p.months_simulated()),
            };
            writeln!(
                f,
                "{:<12} {:>10} {:>16}",
                strategy.as_str(),
                months,
                p.total_interest().round_dp(2)
            )?;
        }
        writeln!(
            f,
            "\nAvalanche saves {} in interest ({:.1}%)",
            self.interest_saved_by_avalanche().round_dp(2),
            self.interest_saved_ratio() * 100.0
        )?;
        writeln!(f, "Recommended: {}", self.recommended())
    }
}
