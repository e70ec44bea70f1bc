use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

use growthsim::core::{simulate, validate};

#[derive(Parser, Debug)]
#[command(
    name = "growthsim",
    about = "Year-by-year investment growth projections (compound/simple interest, deposits, fees, taxation)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the simulation API over HTTP.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Run a single projection and print the yearly records as JSON.
    Run(RunArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInterestType {
    Compound,
    Simple,
}

impl CliInterestType {
    fn as_str(self) -> &'static str {
        match self {
            CliInterestType::Compound => "compound",
            CliInterestType::Simple => "simple",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliDepositFrequency {
    None,
    Monthly,
    Yearly,
}

impl CliDepositFrequency {
    fn as_str(self) -> &'static str {
        match self {
            CliDepositFrequency::None => "none",
            CliDepositFrequency::Monthly => "monthly",
            CliDepositFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTaxTiming {
    Annual,
    Maturity,
}

impl CliTaxTiming {
    fn as_str(self) -> &'static str {
        match self {
            CliTaxTiming::Annual => "annual",
            CliTaxTiming::Maturity => "maturity",
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, help = "Starting principal")]
    principal: f64,
    #[arg(long, value_enum, default_value_t = CliInterestType::Compound)]
    interest_type: CliInterestType,
    #[arg(long, help = "Annual interest rate in percent, e.g. 5")]
    annual_rate: f64,
    #[arg(long, help = "Number of years to project, 1 to 100")]
    years: u32,
    #[arg(long, default_value_t = 0.0, help = "Deposit amount per period")]
    deposit_amount: f64,
    #[arg(long, value_enum, default_value_t = CliDepositFrequency::None)]
    deposit_frequency: CliDepositFrequency,
    #[arg(long, default_value_t = 0.0, help = "Tax rate on interest in percent")]
    tax_rate: f64,
    #[arg(long, value_enum, default_value_t = CliTaxTiming::Annual)]
    tax_timing: CliTaxTiming,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual management fee in percent of balance"
    )]
    management_fee: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "One-time trading fee deducted before year 1"
    )]
    trading_fee: f64,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = growthsim::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Run(args) => {
            if let Err(e) = run_once(args) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

fn run_once(args: RunArgs) -> Result<(), String> {
    // Funnel CLI arguments through the same validator the HTTP boundary
    // uses, so range policy lives in one place.
    let payload = json!({
        "principal": args.principal,
        "interestType": args.interest_type.as_str(),
        "annualRate": args.annual_rate,
        "years": args.years,
        "depositAmount": args.deposit_amount,
        "depositFrequency": args.deposit_frequency.as_str(),
        "taxRate": args.tax_rate,
        "taxTiming": args.tax_timing.as_str(),
        "managementFee": args.management_fee,
        "tradingFee": args.trading_fee,
    });

    let request = validate(&payload).map_err(|e| e.to_string())?;
    let records = simulate(&request);
    let rendered = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}
