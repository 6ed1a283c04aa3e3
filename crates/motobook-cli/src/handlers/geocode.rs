use crate::args::OutputFormat;
use crate::output;
use anyhow::Result;
use motobook_providers::{Geocoder, RegionGeocoder};
use motobook_runtime::Config;
use std::sync::Arc;

/// Search the catalog's pricing regions the way the location step does.
pub async fn handle(config: &Config, query: &str, format: OutputFormat) -> Result<()> {
    let source = config.catalog_source()?;
    let catalog = Arc::new(source.fetch().await?);
    let matches = RegionGeocoder::new(catalog).search(query)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No locations match '{}'", query);
        return Ok(());
    }

    for hit in &matches {
        match hit.pincode {
            Some(pincode) => {
                println!("{}  {}", output::heading(&hit.place_name), output::dim(&hit.context));
                println!("  pincode {}", pincode);
            }
            None => println!("{}  {}", output::heading(&hit.place_name), output::dim(&hit.context)),
        }
    }
    Ok(())
}
