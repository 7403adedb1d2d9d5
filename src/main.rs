//! Property investment calculator CLI
//!
//! Evaluates a residential or commercial deal and prints the expense table,
//! returns, investment status and the first-year amortization schedule.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use property_investment::amortization::{write_schedule_csv, AmortizationRow};
use property_investment::calculator::{
    CommercialResult, ExpenseBreakdown, InvestmentCalculator, CalculatorConfig, DealResult,
    ResidentialResult,
};
use property_investment::{CommercialInputs, Deal, LoanTerm, PropertyInputs, RateTables, SensitivityRunner, State};
use std::env;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "property-calc", version, about = "Property investment calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Rate table CSV (falls back to PROPERTY_RATES_PATH, then the built-in table)
    #[arg(long, global = true)]
    rates: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a residential rental
    Residential {
        #[command(flatten)]
        property: ResidentialArgs,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Evaluate a commercial property
    Commercial {
        #[command(flatten)]
        property: CommercialArgs,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Re-run a residential deal across several interest rates
    SweepRate {
        #[command(flatten)]
        property: ResidentialArgs,

        /// Interest rates to try (percent, comma separated)
        #[arg(long, value_delimiter = ',', default_values_t = [2.0, 4.0, 6.0, 8.0])]
        values: Vec<f64>,
    },
}

/// Schedule output for a single deal
#[derive(Args)]
struct ScheduleArgs {
    /// Amortization rows to show (falls back to SCHEDULE_ROWS, then 12)
    #[arg(long)]
    rows: Option<u32>,

    /// Write the amortization schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,
}

#[derive(Args)]
struct ResidentialArgs {
    #[arg(long, default_value_t = 650_000.0)]
    price: f64,
    /// Down payment (percent of price)
    #[arg(long, default_value_t = 20.0)]
    down_payment: f64,
    /// Annual interest rate (percent)
    #[arg(long, default_value_t = 2.0)]
    interest_rate: f64,
    /// Loan term in years (15 or 30)
    #[arg(long, default_value_t = 15)]
    years: u32,
    #[arg(long, default_value_t = 5_000.0)]
    rent: f64,
    #[arg(long, default_value = "TX")]
    state: State,
}

impl ResidentialArgs {
    fn to_inputs(&self) -> Result<PropertyInputs> {
        Ok(PropertyInputs {
            purchase_price: self.price,
            down_payment_pct: self.down_payment,
            interest_rate_pct: self.interest_rate,
            loan_years: LoanTerm::try_from(self.years)?,
            monthly_rent: self.rent,
            state: self.state,
        })
    }
}

#[derive(Args)]
struct CommercialArgs {
    #[arg(long, default_value_t = 1_970_000.0)]
    price: f64,
    /// Down payment (percent of price)
    #[arg(long, default_value_t = 30.0)]
    down_payment: f64,
    #[arg(long, default_value_t = 152_195.0)]
    gross_rents: f64,
    /// NOI quoted on the listing (informational)
    #[arg(long, default_value_t = 0.0)]
    listing_noi: f64,
    /// Vacancy rate (percent)
    #[arg(long, default_value_t = 3.0)]
    vacancy: f64,
    #[arg(long, default_value_t = 5_000.0)]
    other_expenses: f64,
    /// Loan term in years (1-30)
    #[arg(long, default_value_t = 25)]
    years: u32,
    #[arg(long, default_value = "TX")]
    state: State,
}

impl CommercialArgs {
    fn to_inputs(&self) -> CommercialInputs {
        CommercialInputs {
            purchase_price: self.price,
            down_payment_pct: self.down_payment,
            annual_gross_rents: self.gross_rents,
            annual_noi_listing: self.listing_noi,
            vacancy_rate_pct: self.vacancy,
            other_annual_expenses: self.other_expenses,
            loan_years: self.years,
            state: self.state,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rates_path = cli
        .rates
        .clone()
        .or_else(|| env::var_os("PROPERTY_RATES_PATH").map(PathBuf::from));
    let rates = match rates_path {
        Some(path) => RateTables::from_csv_path(&path)
            .with_context(|| format!("Failed to load rate table from {}", path.display()))?,
        None => RateTables::default(),
    };

    let (deal, schedule_args) = match &cli.command {
        Command::Residential { property, schedule } => (Deal::Residential(property.to_inputs()?), schedule),
        Command::Commercial { property, schedule } => (Deal::Commercial(property.to_inputs()), schedule),
        Command::SweepRate { property, values } => {
            let calculator = InvestmentCalculator::new(rates, CalculatorConfig::from_env());
            let runner = SensitivityRunner::with_calculator(calculator);
            return run_sweep(&runner, &property.to_inputs()?, values, cli.json);
        }
    };

    let config = match schedule_args.rows {
        Some(schedule_rows) => CalculatorConfig { schedule_rows },
        None => CalculatorConfig::from_env(),
    };
    let calculator = InvestmentCalculator::new(rates, config);

    let result = calculator.evaluate(&deal).context("Calculation failed")?;
    let schedule: Vec<AmortizationRow> = calculator.schedule(&result).collect();

    if let Some(path) = &schedule_args.schedule_csv {
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        write_schedule_csv(file, schedule.iter().copied())?;
        log::info!("Schedule written to {}", path.display());
    }

    if cli.json {
        let output = serde_json::json!({
            "deal": deal,
            "result": result,
            "schedule": schedule,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &result {
        DealResult::Residential(r) => print_residential(r),
        DealResult::Commercial(r) => print_commercial(r),
    }
    print_schedule(&schedule);

    if let Some(path) = &schedule_args.schedule_csv {
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}

fn run_sweep(runner: &SensitivityRunner, inputs: &PropertyInputs, values: &[f64], json: bool) -> Result<()> {
    let points = runner.sweep_interest_rate(inputs, values)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{:>8} {:>12} {:>14} {:>16} {:>12}", "Rate %", "P&I", "Total Monthly", "Cash Flow @100%", "ROI @100%");
    println!("{}", "-".repeat(66));
    for point in &points {
        println!(
            "{:>8.2} {:>12.2} {:>14.2} {:>16.2} {:>12}",
            point.value,
            point.monthly_payment,
            point.total_monthly,
            point.cash_flow_at_full_occupancy,
            format_roi(point.annual_roi_at_full_occupancy),
        );
    }
    Ok(())
}

fn format_roi(roi: Option<f64>) -> String {
    roi.map(|r| format!("{:.1}%", r)).unwrap_or_else(|| "n/a".to_string())
}

fn print_expenses(title: &str, expenses: &ExpenseBreakdown) {
    println!("{}", title);
    println!("{}", "-".repeat(40));
    for line in expenses.lines() {
        println!("{:<24} {:>15.2}", line.category.label(), line.amount);
    }
    println!("{:<24} {:>15.2}", "Total", expenses.total());
}

fn print_residential(result: &ResidentialResult) {
    let loan = &result.loan;
    println!("Loan Summary");
    println!("  Down Payment:    ${:.2}", loan.amount_down);
    println!("  Loan Amount:     ${:.2}", loan.loan_amount);
    println!("  Monthly P&I:     ${:.2}", loan.monthly_payment);
    println!("  Total Interest:  ${:.2}", loan.total_interest);
    println!();

    print_expenses("Monthly Expenses", &result.expenses);
    println!();

    println!("Investment Returns");
    println!("{:<16} {:>18} {:>12}", "Scenario", "Monthly Cash Flow", "Annual ROI");
    println!("{}", "-".repeat(48));
    for scenario in &result.scenarios {
        println!(
            "{:<16} {:>18.2} {:>12}",
            format!("{:.0}% Occupancy", scenario.occupancy_rate * 100.0),
            scenario.monthly_cash_flow,
            format_roi(scenario.annual_roi_pct),
        );
    }
    println!();
    println!("Investment Status: {}", result.status);
    println!();
}

fn print_commercial(result: &CommercialResult) {
    let loan = &result.loan;
    println!("Loan Summary");
    println!("  Down Payment:    ${:.2}", loan.amount_down);
    println!("  Loan Amount:     ${:.2}", loan.loan_amount);
    println!("  Monthly Payment: ${:.2}", loan.monthly_payment);
    println!();

    print_expenses("Annual Operating Expenses", &result.expenses);
    println!();

    println!("Returns");
    println!("  Effective Gross Income: ${:.2}", result.effective_gross_income);
    println!("  NOI:                    ${:.2}", result.noi);
    println!("  Annual Debt Service:    ${:.2}", result.annual_debt_service);
    println!("  Annual Cash Flow:       ${:.2}", result.annual_cash_flow);
    println!("  Closing Costs:          ${:.2}", result.closing_costs);
    println!("  Total Cash Invested:    ${:.2}", result.total_cash_invested);
    println!("  Cash-on-Cash Return:    {:.2}%", result.cash_on_cash_pct);
    if result.annual_noi_listing != 0.0 {
        println!("  Listing NOI (as quoted): ${:.2}", result.annual_noi_listing);
    }
    println!();
    println!("Deal Rating: {}", result.rating);
    println!();
}

fn print_schedule(schedule: &[AmortizationRow]) {
    println!("Amortization Schedule ({} payments)", schedule.len());
    println!("{:>7} {:>12} {:>12} {:>14}", "Payment", "Principal", "Interest", "Balance");
    println!("{}", "-".repeat(48));
    for row in schedule {
        println!(
            "{:>7} {:>12.2} {:>12.2} {:>14.2}",
            row.payment_index, row.principal, row.interest, row.remaining_balance
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schedule_flags_on_deal_commands() {
        let cli = Cli::try_parse_from([
            "property-calc", "residential", "--rows", "24", "--schedule-csv", "out.csv", "--state", "mi",
        ])
        .unwrap();

        match cli.command {
            Command::Residential { property, schedule } => {
                assert_eq!(property.state, State::Mi);
                assert_eq!(schedule.rows, Some(24));
                assert_eq!(schedule.schedule_csv, Some(PathBuf::from("out.csv")));
            }
            _ => panic!("expected residential command"),
        }

        let cli = Cli::try_parse_from(["property-calc", "commercial", "--rows", "6", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Commercial { schedule: ScheduleArgs { rows: Some(6), .. }, .. }));
    }

    #[test]
    fn test_sweep_rejects_schedule_flags() {
        assert!(Cli::try_parse_from(["property-calc", "sweep-rate", "--schedule-csv", "out.csv"]).is_err());
        assert!(Cli::try_parse_from(["property-calc", "sweep-rate", "--rows", "24"]).is_err());

        let cli = Cli::try_parse_from(["property-calc", "sweep-rate", "--values", "3,5"]).unwrap();
        match cli.command {
            Command::SweepRate { values, .. } => assert_eq!(values, vec![3.0, 5.0]),
            _ => panic!("expected sweep-rate command"),
        }
    }
}
