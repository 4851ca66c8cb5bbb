use debt_payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use debt_payoff_engine::simulation::accrual::OverflowPolicy;
use debt_payoff_engine::simulation::comparison::compare_strategies;
use debt_payoff_engine::simulation::driver::{
    simulate, PayoffSimulator, SimulationConfig, Termination, MAX_MONTHS,
};
use debt_payoff_engine::strategy::selector::PayoffStrategy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn debt(id: &str, balance: Decimal, rate: Decimal, minimum: Decimal) -> Debt {
    Debt::new(DebtId::new(id), id, balance, rate, minimum)
}

/// Single debt, no extra: 1200 at 12% with 100/month.
#[test]
fn scenario_a_single_debt() {
    let debts = vec![debt("Card", dec!(1200), dec!(12), dec!(100))];
    let projection = PayoffSimulator::new(SimulationConfig::default()).run(&debts);

    let month_one = &projection.timeline()[1];
    assert_eq!(month_one.month, 1);
    assert_eq!(month_one.balance("Card"), Some(dec!(1112)));
    assert_eq!(month_one.total_balance, dec!(1112));

    assert!(projection.is_paid_off());
    assert_eq!(projection.months_to_payoff(), Some(13));
    assert!(projection.months_simulated() <= MAX_MONTHS);
    assert_eq!(projection.remaining_balance(), Decimal::ZERO);

    // Month 13 is off the quarterly grid, so the series ends at month 12.
    let last = projection.timeline().last().unwrap();
    assert_eq!(last.month, 12);
    assert_eq!(last.total_balance, dec!(83.94));
    assert!(projection.timeline().iter().all(|r| r.month != 13));
}

/// Two debts, avalanche, 100 extra: the 20% debt gets 150, the 10% debt 25.
#[test]
fn scenario_b_two_debts_avalanche() {
    let debts = vec![
        debt("A", dec!(1000), dec!(20), dec!(50)),
        debt("B", dec!(500), dec!(10), dec!(25)),
    ];
    let timeline = simulate(&debts, PayoffStrategy::Avalanche, dec!(100));

    let month_one = &timeline[1];
    assert_eq!(month_one.balance("A"), Some(dec!(866.67)));
    assert_eq!(month_one.balance("B"), Some(dec!(479.17)));
    assert_eq!(month_one.total_balance, dec!(1345.83));
}

#[test]
fn scenario_c_empty_debt_list() {
    let timeline = simulate(&[], PayoffStrategy::Snowball, dec!(250));
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].month, 0);
    assert_eq!(timeline[0].total_balance, Decimal::ZERO);
    assert!(timeline[0].balances.is_empty());
}

fn scenario_d_debts() -> Vec<Debt> {
    vec![
        debt("Small", dec!(100), dec!(0), dec!(10)),
        debt("Large", dec!(1000), dec!(0), dec!(50)),
    ]
}

/// Extra payment retires the priority debt in month 1; the overflow cascades.
#[test]
fn scenario_d_overflow_cascades() {
    let config = SimulationConfig {
        strategy: PayoffStrategy::Snowball,
        extra_payment: dec!(500),
        overflow_policy: OverflowPolicy::Cascade,
        ..Default::default()
    };
    let projection = PayoffSimulator::new(config).run(&scenario_d_debts());

    let month_one = &projection.timeline()[1];
    assert_eq!(month_one.balance("Small"), Some(Decimal::ZERO));
    assert_eq!(month_one.balance("Large"), Some(dec!(540)));
    assert!(projection
        .timeline()
        .iter()
        .all(|r| r.balances.values().all(|b| *b >= Decimal::ZERO)));

    let order = projection.payoff_order();
    assert_eq!(order[0].name, "Small");
    assert_eq!(order[0].month, 1);
    assert_eq!(projection.months_to_payoff(), Some(2));
}

/// Same setup with the overflow forfeited: the large debt only sees its minimum.
#[test]
fn scenario_d_overflow_forfeited() {
    let config = SimulationConfig {
        strategy: PayoffStrategy::Snowball,
        extra_payment: dec!(500),
        overflow_policy: OverflowPolicy::Forfeit,
        ..Default::default()
    };
    let projection = PayoffSimulator::new(config).run(&scenario_d_debts());

    let month_one = &projection.timeline()[1];
    assert_eq!(month_one.balance("Small"), Some(Decimal::ZERO));
    assert_eq!(month_one.balance("Large"), Some(dec!(950)));
    assert_eq!(projection.months_to_payoff(), Some(3));
    // 410 lost in month 1, 150 in the final month.
    assert_eq!(projection.overflow_forfeited(), dec!(560));
}

fn household() -> Vec<Debt> {
    vec![
        debt("Card", dec!(5000), dec!(24), dec!(150)),
        debt("Car", dec!(8000), dec!(6), dec!(200)),
        debt("Store", dec!(1200), dec!(18), dec!(40)),
    ]
}

#[test]
fn avalanche_interest_not_above_snowball_on_fixtures() {
    let fixtures = vec![
        (household(), dec!(300)),
        (
            vec![
                debt("A", dec!(1000), dec!(20), dec!(50)),
                debt("B", dec!(500), dec!(10), dec!(25)),
            ],
            dec!(100),
        ),
        (
            vec![
                debt("Student", dec!(15000), dec!(4.5), dec!(160)),
                debt("Visa", dec!(3200), dec!(22.9), dec!(95)),
                debt("Medical", dec!(600), dec!(0), dec!(50)),
            ],
            dec!(400),
        ),
    ];

    for policy in [OverflowPolicy::Cascade, OverflowPolicy::Forfeit] {
        for (debts, extra) in &fixtures {
            let config = SimulationConfig {
                extra_payment: *extra,
                overflow_policy: policy,
                ..Default::default()
            };
            let comparison = compare_strategies(debts, &config);
            assert!(
                comparison.avalanche.total_interest() <= comparison.snowball.total_interest(),
                "avalanche {} > snowball {} ({})",
                comparison.avalanche.total_interest(),
                comparison.snowball.total_interest(),
                policy
            );
        }
    }
}

#[test]
fn household_snowball_retires_store_card_first() {
    let config = SimulationConfig::new(PayoffStrategy::Snowball, dec!(300));
    let projection = PayoffSimulator::new(config).run(&household());
    let names: Vec<&str> = projection
        .payoff_order()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Store", "Card", "Car"]);
    assert_eq!(projection.months_to_payoff(), Some(27));
}

#[test]
fn household_avalanche_retires_card_first() {
    let config = SimulationConfig::new(PayoffStrategy::Avalanche, dec!(300));
    let projection = PayoffSimulator::new(config).run(&household());
    let names: Vec<&str> = projection
        .payoff_order()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Card", "Store", "Car"]);

    let months: Vec<u32> = projection.timeline().iter().map(|r| r.month).collect();
    assert_eq!(
        months,
        vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 15, 18, 21, 24, 27]
    );
}

#[test]
fn simulation_is_deterministic() {
    let config = SimulationConfig::new(PayoffStrategy::Snowball, dec!(275.50));
    let first = PayoffSimulator::new(config.clone()).run(&household());
    let second = PayoffSimulator::new(config).run(&household());
    assert_eq!(
        serde_json::to_string(first.timeline()).unwrap(),
        serde_json::to_string(second.timeline()).unwrap()
    );
    assert_eq!(first, second);
}

#[test]
fn unpayable_debt_hits_horizon() {
    let debts = vec![debt("Stuck", dec!(10000), dec!(24), dec!(150))];
    let projection = PayoffSimulator::new(SimulationConfig::default()).run(&debts);
    assert_eq!(projection.termination(), Termination::HorizonReached);
    assert_eq!(projection.months_simulated(), MAX_MONTHS);
    assert!(projection.remaining_balance() > Decimal::ZERO);
}

#[test]
fn malformed_inputs_are_clamped() {
    let debts = vec![
        debt("Negative", dec!(-500), dec!(-3), dec!(-20)),
        Debt::from_f64(DebtId::new("nan"), "NaN", f64::NAN, 12.0, 50.0),
        debt("Real", dec!(300), dec!(12), dec!(100)),
    ];
    let projection = PayoffSimulator::new(SimulationConfig::new(
        PayoffStrategy::Snowball,
        dec!(-10),
    ))
    .run(&debts);

    let start = &projection.timeline()[0];
    assert_eq!(start.balance("Negative"), Some(Decimal::ZERO));
    assert_eq!(start.balance("NaN"), Some(Decimal::ZERO));
    assert_eq!(start.total_balance, dec!(300));
    assert!(projection.is_paid_off());
}

#[test]
fn timeline_json_shape() {
    let debts = vec![
        debt("Visa", dec!(900), dec!(18), dec!(100)),
        debt("Loan", dec!(400), dec!(5), dec!(50)),
    ];
    let timeline = simulate(&debts, PayoffStrategy::Avalanche, dec!(50));
    let json = serde_json::to_value(&timeline).unwrap();
    let first = &json[0];
    assert_eq!(first["month"], 0);
    assert_eq!(first["totalBalance"], "1300");
    assert_eq!(first["Visa"], "900");
    assert_eq!(first["Loan"], "400");
}

#[test]
fn projection_serializes() {
    let projection = PayoffSimulator::new(SimulationConfig::default()).run(&household());
    let json = serde_json::to_value(&projection).unwrap();
    assert_eq!(json["strategy"], "avalanche");
    assert_eq!(json["termination"], "paid_off");
    assert!(json["timeline"].as_array().unwrap().len() > 1);
    assert!(json.get("payoffs").is_some());
}

#[test]
fn portfolio_feeds_simulator() {
    let portfolio: DebtPortfolio = household().into_iter().collect();
    let projection = PayoffSimulator::default().run(portfolio.debts());
    assert_eq!(projection.starting_balance(), portfolio.total_balance());
}
