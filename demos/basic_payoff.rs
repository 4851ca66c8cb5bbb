//! Project a small household's debts under the avalanche strategy.
//!
//! Shows the month-by-month timeline the engine produces for charting.

use debt_payoff_engine::core::debt::{Debt, DebtId};
use debt_payoff_engine::simulation::driver::{PayoffSimulator, SimulationConfig};
use debt_payoff_engine::strategy::selector::PayoffStrategy;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Basic Payoff Plan   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let debts = vec![
        Debt::new(DebtId::new("visa"), "Visa", dec!(5000), dec!(24), dec!(150)),
        Debt::new(DebtId::new("car"), "Car Loan", dec!(8000), dec!(6), dec!(200)),
        Debt::new(DebtId::new("store"), "Store Card", dec!(1200), dec!(18), dec!(40)),
    ];

    let config = SimulationConfig::new(PayoffStrategy::Avalanche, dec!(300));
    let projection = PayoffSimulator::new(config).run(&debts);

    println!("{}", projection);

    println!("━━━ Timeline ━━━\n");
    println!(
        "  {:>5} {:>12} {:>12} {:>12} {:>12}",
        "month", "Visa", "Car Loan", "Store Card", "total"
    );
    for record in projection.timeline() {
        println!(
            "  {:>5} {:>12} {:>12} {:>12} {:>12}",
            record.month,
            record.balance("Visa").unwrap_or_default(),
            record.balance("Car Loan").unwrap_or_default(),
            record.balance("Store Card").unwrap_or_default(),
            record.total_balance
        );
    }
}
