use crate::args::{CatalogCommand, Cli, Commands};
use crate::handlers;
use anyhow::Result;
use motobook_runtime::{Config, resolve_data_dir};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config_path = data_dir.join("config.toml");

    // Init must work before any config exists, so it is dispatched first.
    match cli.command {
        Commands::Init { endpoint, catalog_file } => {
            handlers::init::handle(&config_path, endpoint, catalog_file)
        }

        command => {
            let config = Config::load_from(&config_path)?;
            let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

            match command {
                Commands::Init { .. } => unreachable!("handled above"),

                Commands::Catalog { command } => match command {
                    CatalogCommand::Show => {
                        runtime.block_on(handlers::catalog::show(&config, cli.format))
                    }
                    CatalogCommand::Check => runtime.block_on(handlers::catalog::check(&config)),
                },

                Commands::Geocode { query } => {
                    runtime.block_on(handlers::geocode::handle(&config, &query, cli.format))
                }

                Commands::Quote {
                    model,
                    location,
                    variant,
                    color,
                    components,
                    plans,
                    tenure,
                    loan,
                    loan_tenure,
                    down_payment,
                } => runtime.block_on(handlers::quote::handle(
                    &config,
                    handlers::quote::QuoteArgs {
                        model,
                        location,
                        variant,
                        color,
                        components,
                        plans,
                        tenure,
                        loan,
                        loan_tenure,
                        down_payment,
                    },
                    cli.format,
                )),

                Commands::Demo { outcome, otp } => {
                    runtime.block_on(handlers::demo::handle(&config, outcome, otp))
                }
            }
        }
    }
}
