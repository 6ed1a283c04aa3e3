//! Custom assertions over quote and catalog JSON output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert the quote JSON carries the expected grand total.
pub fn assert_grand_total(json: &Value, expected: i64) -> Result<()> {
    let total = json["grand_total"].as_i64().context("Expected 'grand_total' in quote JSON")?;
    if total != expected {
        anyhow::bail!("Expected grand total {}, got {}", expected, total);
    }
    Ok(())
}

/// Assert a named line item with the given price exists in a quote array
/// ("components" or "insurance").
pub fn assert_line_item(json: &Value, array: &str, title: &str, price: i64) -> Result<()> {
    let items = json[array]
        .as_array()
        .with_context(|| format!("Expected '{}' array in quote JSON", array))?;

    let found = items
        .iter()
        .any(|item| item["title"].as_str() == Some(title) && item["price"].as_i64() == Some(price));
    if !found {
        anyhow::bail!("No line item {:?} at price {} in '{}': {}", title, price, array, json);
    }
    Ok(())
}

/// Assert the catalog summary JSON reports the expected model count.
pub fn assert_model_count(json: &Value, expected: usize) -> Result<()> {
    let models = json["models"].as_array().context("Expected 'models' array in catalog JSON")?;
    if models.len() != expected {
        anyhow::bail!("Expected {} models, got {}", expected, models.len());
    }
    Ok(())
}
