use crate::args::OutputFormat;
use crate::output;
use anyhow::{Result, bail};
use motobook_engine::pricing::Quote;
use motobook_providers::{Geocoder, RegionGeocoder};
use motobook_runtime::{BookingSession, CatalogStore, Config};
use motobook_types::{ComponentId, InsurancePlanId, Location, Money, PaymentMethod};

pub struct QuoteArgs {
    pub model: String,
    pub location: String,
    pub variant: Option<String>,
    pub color: Option<String>,
    pub components: Vec<i64>,
    pub plans: Vec<i64>,
    pub tenure: Option<u32>,
    pub loan: bool,
    pub loan_tenure: Option<u32>,
    pub down_payment: Option<i64>,
}

/// Build a one-shot session from the flags and print its quote.
pub async fn handle(config: &Config, args: QuoteArgs, format: OutputFormat) -> Result<()> {
    let source = config.catalog_source()?;
    let mut store = CatalogStore::new();
    let catalog = store.load(source.as_ref(), config.catalog_timeout()).await?;
    let mut session = BookingSession::from_store(&store)?;

    // First geocoder hit wins; free text that matches nothing still prices
    // against the model's fallback row.
    let location = match RegionGeocoder::new(catalog.clone()).search(&args.location)?.first() {
        Some(hit) => hit.to_location(),
        None => Location::manual(&args.location),
    };
    session.set_location(location);

    let Some(model) = catalog.model_by_code(&args.model) else {
        bail!("unknown model '{}'", args.model);
    };
    session.select_vehicle(model.id)?;

    if let Some(code) = &args.variant {
        let Some(variant) =
            catalog.variants_for(model.id).find(|v| v.code.eq_ignore_ascii_case(code))
        else {
            bail!("unknown variant '{}' for {}", code, model.code);
        };
        session.select_variant(variant.id)?;
    }

    if let Some(name) = &args.color {
        let Some(color) = catalog.colors_for(model.id).find(|c| c.name.eq_ignore_ascii_case(name))
        else {
            bail!("unknown color '{}' for {}", name, model.code);
        };
        session.select_color(color.id)?;
    }

    for id in &args.components {
        session.toggle_component(ComponentId(*id))?;
    }
    for id in &args.plans {
        session.toggle_plan(InsurancePlanId(*id))?;
    }
    if let Some(months) = args.tenure {
        session.set_insurance_tenure(months);
    }

    if args.loan {
        session.set_payment_method(PaymentMethod::Loan);
        if let Some(months) = args.loan_tenure {
            session.set_loan_tenure(months);
        }
        if let Some(amount) = args.down_payment {
            session.set_down_payment(Money(amount));
        }
    }

    let quote = session.quote();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }
    print_plain(&quote);
    Ok(())
}

fn print_plain(quote: &Quote) {
    match (&quote.model, &quote.region) {
        (Some(model), Some(region)) => {
            println!("{}", output::heading(&format!("{} ({})", model, region)))
        }
        (Some(model), None) => println!("{}", output::heading(model)),
        _ => println!("{}", output::heading("Quote")),
    }
    println!();

    line("Base price", quote.base_price);
    if let Some(variant) = &quote.variant {
        line(&variant.title, variant.price);
    }
    for component in &quote.components {
        line(&component.title, component.price);
    }
    line("Vehicle total", quote.vehicle_total);
    println!();

    for plan in &quote.insurance {
        line(&plan.title, plan.price);
    }
    line("Insurance total", quote.insurance_total);
    println!();

    line(&output::heading("Grand total"), quote.grand_total);
    println!("{}", output::dim(&format!("Fulfillment fee (payable at delivery): {}", quote.fulfillment_fee)));

    if let Some(emi) = &quote.emi {
        println!();
        println!("{}", output::heading("Loan"));
        line("Down payment", emi.down_payment);
        line("Principal", emi.principal);
        line("Processing fee", emi.processing_fee);
        println!(
            "  {:<24}{} x {} months @ {}% p.a.",
            "Monthly EMI", emi.monthly_emi, emi.tenure_months, emi.annual_interest_rate
        );
    }
}

fn line(title: &str, amount: Money) {
    println!("  {:<24}{}", title, amount);
}
