//! End-to-end tests of the motobook binary against an isolated data dir.

use anyhow::Result;
use motobook_testing::{TestWorld, assertions};
use serde_json::Value;

#[test]
fn test_catalog_show_lists_the_lineup() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["catalog", "show"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("KM3000"));
    assert!(result.stdout().contains("KM4000"));
    assert!(result.stdout().contains("New Delhi, Delhi"));
    Ok(())
}

#[test]
fn test_catalog_show_json_reports_both_models() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["--format", "json", "catalog", "show"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assertions::assert_model_count(&result.json()?, 2)?;
    Ok(())
}

#[test]
fn test_catalog_check_passes_on_the_sample_snapshot() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["catalog", "check"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Catalog OK"));
    Ok(())
}

#[test]
fn test_catalog_check_reports_violations_and_fails() -> Result<()> {
    let world = TestWorld::new();

    let mut body: Value = serde_json::from_str(&motobook_testing::fixtures::sample_catalog_body())?;
    body["data"]["components"][0]["price"] = Value::from(-5);
    world.write_catalog(&body.to_string());

    let result = world.run(&["catalog", "check"])?;
    assert!(!result.success());
    assert!(result.stdout().contains("violation:"), "stdout: {}", result.stdout());
    Ok(())
}

#[test]
fn test_geocode_pincode_finds_the_region() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["geocode", "110042"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("New Delhi"));
    Ok(())
}

#[test]
fn test_geocode_json_returns_match_objects() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["--format", "json", "geocode", "mumbai"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let matches = result.json()?;
    assert_eq!(matches.as_array().map(|a| a.len()), Some(1));
    assert_eq!(matches[0]["context"], "Mumbai, Maharashtra");
    Ok(())
}

#[test]
fn test_quote_defaults_in_delhi() -> Result<()> {
    let world = TestWorld::new();
    let result =
        world.run(&["--format", "json", "quote", "--model", "KM3000", "--location", "Delhi"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let quote = result.json()?;
    assertions::assert_grand_total(&quote, 184790)?;
    assertions::assert_line_item(&quote, "components", "Helmet", 999)?;
    assertions::assert_line_item(&quote, "insurance", "BASE INSURANCE", 9942)?;
    Ok(())
}

#[test]
fn test_quote_with_optional_component() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&[
        "--format",
        "json",
        "quote",
        "--model",
        "KM3000",
        "--location",
        "Delhi",
        "--component",
        "51",
    ])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let quote = result.json()?;
    assertions::assert_grand_total(&quote, 185789)?;
    assertions::assert_line_item(&quote, "components", "Smart Connectivity", 999)?;
    Ok(())
}

#[test]
fn test_quote_loan_includes_emi_block() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&[
        "--format",
        "json",
        "quote",
        "--model",
        "KM3000",
        "--location",
        "110042",
        "--loan",
        "--loan-tenure",
        "12",
        "--down-payment",
        "10000",
    ])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let quote = result.json()?;
    assert_eq!(quote["emi"]["tenure_months"], 12);
    assert_eq!(quote["emi"]["down_payment"], 10000);
    Ok(())
}

#[test]
fn test_quote_unknown_model_is_an_error() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["quote", "--model", "KM9000", "--location", "Delhi"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("unknown model"));
    Ok(())
}

#[test]
fn test_demo_success_prints_a_booking_id() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["demo"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Booking Confirmed"), "stdout: {}", result.stdout());
    assert!(result.stdout().contains("MB-"));
    Ok(())
}

#[test]
fn test_demo_declined_lands_on_the_failure_step() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["demo", "--outcome", "declined"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Payment Failed"), "stdout: {}", result.stdout());
    Ok(())
}

#[test]
fn test_demo_wrong_otp_never_reaches_payment() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["demo", "--otp", "000000"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("rejected"));
    Ok(())
}

#[test]
fn test_unconfigured_world_points_at_init() -> Result<()> {
    let world = TestWorld::unconfigured();
    let result = world.run(&["catalog", "show"])?;

    assert!(!result.success());
    assert!(result.stderr().contains("no catalog source configured"));
    Ok(())
}

#[test]
fn test_init_writes_a_loadable_config() -> Result<()> {
    let world = TestWorld::unconfigured();
    let catalog_path = world.catalog_path().to_string_lossy().to_string();
    motobook_testing::fixtures::write_catalog_file(world.temp_dir());

    let init = world.run(&["init", "--catalog-file", &catalog_path])?;
    assert!(init.success(), "stderr: {}", init.stderr());

    let result = world.run(&["catalog", "check"])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    Ok(())
}
