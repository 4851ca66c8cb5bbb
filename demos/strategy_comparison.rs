//! Avalanche versus snowball on the same debts and budget.
//!
//! Also shows the two overflow policies side by side.

use chrono::NaiveDate;
use debt_payoff_engine::core::debt::{Debt, DebtId};
use debt_payoff_engine::simulation::accrual::OverflowPolicy;
use debt_payoff_engine::simulation::comparison::compare_strategies;
use debt_payoff_engine::simulation::driver::SimulationConfig;
use debt_payoff_engine::strategy::selector::PayoffStrategy;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Strategy Comparison     ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let debts = vec![
        Debt::new(DebtId::new("student"), "Student Loan", dec!(15000), dec!(4.5), dec!(160)),
        Debt::new(DebtId::new("visa"), "Visa", dec!(3200), dec!(22.9), dec!(95)),
        Debt::new(DebtId::new("medical"), "Medical Bill", dec!(600), dec!(0), dec!(50)),
    ];
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");

    for policy in [OverflowPolicy::Cascade, OverflowPolicy::Forfeit] {
        println!("━━━ Overflow policy: {} ━━━\n", policy);

        let config = SimulationConfig {
            extra_payment: dec!(400),
            overflow_policy: policy,
            ..Default::default()
        };
        let comparison = compare_strategies(&debts, &config);
        println!("{}", comparison);

        for strategy in PayoffStrategy::ALL {
            let projection = comparison.projection(strategy);
            let order: Vec<&str> = projection
                .payoff_order()
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            let date = projection
                .payoff_date(start)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "not within 10 years".to_string());
            println!("  {:<10} {}  (debt free {})", strategy, order.join(" → "), date);
        }
        println!();
    }
}
