use anyhow::Result;
use motobook_runtime::Config;
use std::path::PathBuf;

/// Write (or rewrite) the config file with the given catalog source.
pub fn handle(
    config_path: &PathBuf,
    endpoint: Option<String>,
    catalog_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    if let Some(endpoint) = endpoint {
        config.catalog.endpoint = Some(endpoint);
    }
    if let Some(file) = catalog_file {
        config.catalog.file = Some(file);
    }

    config.save_to(config_path)?;
    println!("Wrote {}", config_path.display());

    match (&config.catalog.file, &config.catalog.endpoint) {
        (Some(file), _) => println!("Catalog source: {}", file.display()),
        (None, Some(endpoint)) => println!("Catalog source: {}", endpoint),
        (None, None) => {
            println!("No catalog source set; pass --endpoint or --catalog-file to configure one")
        }
    }
    Ok(())
}
