//! debt-payoff-engine CLI
//!
//! Project debt repayment from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Project a payoff plan from a JSON file
//! debt-payoff-engine simulate --input debts.json --strategy snowball --extra 200
//!
//! # Output the full projection (timeline included) as JSON
//! debt-payoff-engine simulate --input debts.json --format json
//!
//! # Compare avalanche and snowball
//! debt-payoff-engine compare --input debts.json --extra 200
//!
//! # Generate a random portfolio for testing
//! debt-payoff-engine generate --debts 6
//! ```

use chrono::NaiveDate;
use debt_payoff_engine::core::debt::{parse_amount, Debt, DebtError};
use debt_payoff_engine::simulation::accrual::OverflowPolicy;
use debt_payoff_engine::simulation::comparison::compare_strategies;
use debt_payoff_engine::simulation::driver::{PayoffSimulator, SimulationConfig};
use debt_payoff_engine::simulation::generator::{generate_random_portfolio, PortfolioConfig};
use debt_payoff_engine::strategy::selector::PayoffStrategy;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debt-payoff-engine — month-by-month debt repayment projection

USAGE:
    debt-payoff-engine <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Project repayment under one strategy
    compare     Compare avalanche and snowball on the same debts
    generate    Generate a random debt portfolio (for testing)
    help        Show this message

OPTIONS (simulate, compare):
    --input <FILE>        Path to JSON debts file
    --strategy <NAME>     avalanche (default) or snowball (simulate only)
    --extra <AMOUNT>      Monthly payment on top of all minimums (default: 0)
    --overflow <POLICY>   cascade (default) or forfeit
    --start <YYYY-MM-DD>  Start date, used to report the debt-free date
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (generate):
    --debts <N>           Number of debts (default: 5)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    debt-payoff-engine simulate --input debts.json
    debt-payoff-engine simulate --input debts.json --strategy snowball --extra 250
    debt-payoff-engine compare --input debts.json --extra 250 --format json
    debt-payoff-engine generate --debts 8 --output debts.json"#
    );
}

/// JSON schema for the input file. Command-line flags override these fields.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct DebtsFile {
    debts: Vec<Debt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strategy: Option<PayoffStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overflow_policy: Option<OverflowPolicy>,
}

struct RunOptions {
    input_path: String,
    strategy: Option<PayoffStrategy>,
    extra_payment: Option<Decimal>,
    overflow_policy: Option<OverflowPolicy>,
    start: Option<NaiveDate>,
    format: String,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn required_value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    args.get(i)
        .map(String::as_str)
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, what)))
}

fn or_fail<T>(result: Result<T, DebtError>) -> T {
    result.unwrap_or_else(|e| fail(e))
}

fn parse_run_options(args: &[String]) -> RunOptions {
    let mut input_path = None;
    let mut strategy = None;
    let mut extra_payment = None;
    let mut overflow_policy = None;
    let mut start = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        match flag {
            "--input" => {
                input_path = Some(required_value(args, i, flag, "a file path").to_string());
            }
            "--strategy" => {
                let value = required_value(args, i, flag, "'avalanche' or 'snowball'");
                strategy = Some(or_fail(value.parse::<PayoffStrategy>()));
            }
            "--extra" => {
                let value = required_value(args, i, flag, "an amount");
                extra_payment = Some(or_fail(parse_amount("extra payment", value)));
            }
            "--overflow" => {
                let value = required_value(args, i, flag, "'cascade' or 'forfeit'");
                overflow_policy = Some(or_fail(value.parse::<OverflowPolicy>()));
            }
            "--start" => {
                let value = required_value(args, i, flag, "a date (YYYY-MM-DD)");
                start = Some(
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .unwrap_or_else(|e| fail(format!("invalid start date '{}': {}", value, e))),
                );
            }
            "--format" => {
                format = required_value(args, i, flag, "'text' or 'json'").to_string();
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    RunOptions {
        input_path,
        strategy,
        extra_payment,
        overflow_policy,
        start,
        format,
    }
}

fn load_debts(path: &str) -> DebtsFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "debts": [
    {{ "id": "visa", "name": "Visa", "balance": "2500", "interestRate": "19.99", "minimumPayment": "75" }}
  ],
  "extraPayment": "200"
}}"#
        );
        process::exit(1);
    })
}

fn build_config(options: &RunOptions, file: &DebtsFile) -> SimulationConfig {
    SimulationConfig {
        strategy: options.strategy.or(file.strategy).unwrap_or_default(),
        extra_payment: options
            .extra_payment
            .or(file.extra_payment)
            .unwrap_or(Decimal::ZERO),
        overflow_policy: options
            .overflow_policy
            .or(file.overflow_policy)
            .unwrap_or_default(),
        ..Default::default()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("serializing output: {}", e)))
}

fn cmd_simulate(args: &[String]) {
    let options = parse_run_options(args);
    let file = load_debts(&options.input_path);
    let config = build_config(&options, &file);
    let projection = PayoffSimulator::new(config).run(&file.debts);

    if options.format == "json" {
        println!("{}", to_json(&projection));
        return;
    }

    println!("{}", projection);
    if let Some(start) = options.start {
        match projection.payoff_date(start) {
            Some(date) => println!("Debt free on:     {}", date),
            None => println!("Debt free on:     beyond the projection horizon"),
        }
    }

    println!("\n━━━ Timeline ━━━\n");
    for record in projection.timeline() {
        println!("  month {:>3}  {:>14}", record.month, record.total_balance);
    }
}

fn cmd_compare(args: &[String]) {
    let options = parse_run_options(args);
    let file = load_debts(&options.input_path);
    let config = build_config(&options, &file);
    let comparison = compare_strategies(&file.debts, &config);

    if options.format == "json" {
        println!("{}", to_json(&comparison));
        return;
    }

    println!("{}", comparison);
    if let Some(start) = options.start {
        for strategy in PayoffStrategy::ALL {
            if let Some(date) = comparison.projection(strategy).payoff_date(start) {
                println!("{} debt free on {}", strategy, date);
            }
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut debt_count = 5usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        match flag {
            "--debts" => {
                debt_count = required_value(args, i, flag, "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--debts requires a number"));
            }
            "--output" => {
                output_path = Some(required_value(args, i, flag, "a file path").to_string());
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    let portfolio = generate_random_portfolio(&PortfolioConfig {
        debt_count,
        ..Default::default()
    });
    let output = DebtsFile {
        debts: portfolio.debts().to_vec(),
        strategy: None,
        extra_payment: None,
        overflow_policy: None,
    };
    let json = to_json(&output);

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} debts totalling {} → {}",
            portfolio.len(),
            portfolio.total_balance(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "compare" => cmd_compare(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
