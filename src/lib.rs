//! # debt-payoff-engine
//!
//! Month-by-month debt repayment projection.
//!
//! Given a set of debts, a repayment strategy and a fixed monthly extra
//! payment, this engine projects balances until every debt is retired or ten
//! years have passed, and produces a sampled timeline for charting.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: debts, portfolios, per-run snapshots
//! - **strategy** — Avalanche and snowball prioritization
//! - **simulation** — Monthly accrual, the driver loop, timeline sampling,
//!   strategy comparison and random portfolio generation

pub mod core;
pub mod simulation;
pub mod strategy;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::debt::{Debt, DebtError, DebtId, DebtPortfolio};
    pub use crate::simulation::accrual::OverflowPolicy;
    pub use crate::simulation::comparison::{compare_strategies, StrategyComparison};
    pub use crate::simulation::driver::{
        simulate, PayoffProjection, PayoffSimulator, SimulationConfig, Termination, MAX_MONTHS,
    };
    pub use crate::simulation::timeline::{SamplingPolicy, TimelineRecord};
    pub use crate::strategy::selector::PayoffStrategy;
}
