use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoOutcome {
    Success,
    Declined,
}

#[derive(Parser)]
#[command(name = "motobook")]
#[command(about = "Price, configure and demo electric-vehicle bookings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write the config file into the data dir")]
    Init {
        #[arg(long, help = "Catalog endpoint URL")]
        endpoint: Option<String>,

        #[arg(long, help = "Local catalog JSON file (takes precedence over the endpoint)")]
        catalog_file: Option<PathBuf>,
    },

    #[command(about = "Inspect the configured catalog")]
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    #[command(about = "Search delivery locations against the pricing regions")]
    Geocode {
        query: String,
    },

    #[command(about = "Price a configuration and print the itemized quote")]
    Quote {
        #[arg(long, help = "Model code, e.g. KM3000")]
        model: String,

        #[arg(long, help = "Delivery location text or 6-digit pincode")]
        location: String,

        #[arg(long, help = "Variant code (defaults to the model's default variant)")]
        variant: Option<String>,

        #[arg(long, help = "Color name (defaults to the model's default color)")]
        color: Option<String>,

        #[arg(long = "component", help = "Optional component id (repeatable)")]
        components: Vec<i64>,

        #[arg(long = "plan", help = "Insurance plan id (repeatable)")]
        plans: Vec<i64>,

        #[arg(long, help = "Insurance tenure in months")]
        tenure: Option<u32>,

        #[arg(long, help = "Quote a loan instead of full payment")]
        loan: bool,

        #[arg(long, help = "Loan tenure in months")]
        loan_tenure: Option<u32>,

        #[arg(long, help = "Down payment in rupees")]
        down_payment: Option<i64>,
    },

    #[command(about = "Scripted end-to-end funnel run against the mock gateways")]
    Demo {
        #[arg(long, default_value = "success")]
        outcome: DemoOutcome,

        #[arg(long, help = "OTP code the demo buyer enters (default: the accepted code)")]
        otp: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    #[command(about = "Load the snapshot and summarize the lineup")]
    Show,

    #[command(about = "Run data-quality validation and report each violation")]
    Check,
}
