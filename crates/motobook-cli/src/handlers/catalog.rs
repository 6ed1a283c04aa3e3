use crate::args::OutputFormat;
use crate::output;
use anyhow::Result;
use motobook_runtime::Config;
use serde_json::json;

/// Load the snapshot through the full validated path and summarize it.
pub async fn show(config: &Config, format: OutputFormat) -> Result<()> {
    let source = config.catalog_source()?;
    let catalog = source.fetch().await?;

    if format == OutputFormat::Json {
        let models: Vec<_> = catalog
            .models
            .iter()
            .map(|model| {
                json!({
                    "id": model.id,
                    "code": model.code,
                    "name": model.name,
                    "variants": catalog.variants_for(model.id).count(),
                    "colors": catalog.colors_for(model.id).count(),
                    "components": catalog.components_for(model.id).count(),
                    "regions": catalog.pricing_for(model.id).count(),
                })
            })
            .collect();
        let doc = json!({
            "source": source.describe(),
            "models": models,
            "insurance_plans": catalog.insurance_plans.len(),
            "finance_options": catalog.finance_options.len(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Catalog: {}", source.describe());
    println!();
    for model in &catalog.models {
        println!("{}  {}", output::heading(&model.code), model.name);
        println!(
            "  {} variants, {} colors, {} components",
            catalog.variants_for(model.id).count(),
            catalog.colors_for(model.id).count(),
            catalog.components_for(model.id).count(),
        );
        for row in catalog.pricing_for(model.id) {
            println!(
                "  {}  {} + {} fulfillment",
                output::dim(&row.region_label()),
                row.base_price,
                row.fulfillment_fee
            );
        }
    }
    println!();
    println!(
        "{} insurance plans, {} finance options",
        catalog.insurance_plans.len(),
        catalog.finance_options.len()
    );
    Ok(())
}

/// Run every integrity rule and report all violations, not just the first.
pub async fn check(config: &Config) -> Result<()> {
    let source = config.catalog_source()?;
    let catalog = source.fetch_unvalidated().await?;

    let violations = catalog.violations();
    if violations.is_empty() {
        println!(
            "{} ({} models, {} pricing rows, {} insurance plans)",
            output::ok("Catalog OK"),
            catalog.models.len(),
            catalog.pricing.len(),
            catalog.insurance_plans.len()
        );
        return Ok(());
    }

    for violation in &violations {
        println!("{} {}", output::warn("violation:"), violation);
    }
    anyhow::bail!("catalog failed validation with {} violation(s)", violations.len());
}
