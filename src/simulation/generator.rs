//! Random debt portfolios for benchmarks and demos.

use crate::core::debt::{Debt, DebtId, DebtPortfolio};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use uuid::Uuid;

const NAMES: [&str; 8] = [
    "Credit Card",
    "Store Card",
    "Car Loan",
    "Student Loan",
    "Personal Loan",
    "Medical Bill",
    "Line of Credit",
    "Furniture Plan",
];

/// Shape of a generated portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub debt_count: usize,
    pub min_balance: Decimal,
    pub max_balance: Decimal,
    /// Annual percentage rate bounds.
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    /// Minimum payment as a fraction of the starting balance.
    pub min_payment_ratio: Decimal,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 5,
            min_balance: Decimal::from(500),
            max_balance: Decimal::from(20_000),
            min_rate: Decimal::ZERO,
            max_rate: Decimal::from(30),
            min_payment_ratio: Decimal::new(3, 2),
        }
    }
}

/// Generate a random portfolio.
///
/// Every minimum payment covers at least the first month's interest plus one
/// unit, so balances never grow.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> DebtPortfolio {
    let mut rng = rand::thread_rng();
    let mut portfolio = DebtPortfolio::new();

    for i in 0..config.debt_count {
        let balance = random_between(&mut rng, config.min_balance, config.max_balance);
        let rate = random_between(&mut rng, config.min_rate, config.max_rate);
        let mut debt = Debt::new(
            DebtId::new(Uuid::new_v4().to_string()),
            format!("{} {}", NAMES[i % NAMES.len()], i / NAMES.len() + 1),
            balance,
            rate,
            Decimal::ZERO,
        );
        let interest_floor = (balance * debt.monthly_rate()).ceil() + Decimal::ONE;
        debt.minimum_payment = (balance * config.min_payment_ratio)
            .round_dp(2)
            .max(interest_floor);
        portfolio.add(debt);
    }

    portfolio
}

fn random_between<R: Rng>(rng: &mut R, low: Decimal, high: Decimal) -> Decimal {
    if high <= low {
        return low;
    }
    let (Some(low_f64), Some(high_f64)) = (low.to_f64(), high.to_f64()) else {
        return low;
    };
    if high_f64 <= low_f64 {
        return low;
    }
    let value = rng.gen_range(low_f64..high_f64);
    Decimal::from_f64(value)
        .unwrap_or(low)
        .round_dp(2)
        .clamp(low, high)
}
