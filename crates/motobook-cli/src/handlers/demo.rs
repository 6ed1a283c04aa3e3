use crate::args::DemoOutcome;
use crate::output;
use anyhow::{Result, bail};
use motobook_providers::{MockOtpGateway, MockPaymentGateway, OtpOutcome, PaymentOutcome};
use motobook_runtime::{AdvanceOutcome, BookingSession, CatalogStore, Config};
use motobook_types::{Location, PersonalInfo};

/// Scripted run through the whole funnel against the mock gateways: a
/// default configuration in the catalog's first delivery region, a fixed
/// demo buyer, then OTP and payment with the requested outcome.
pub async fn handle(config: &Config, outcome: DemoOutcome, otp: Option<String>) -> Result<()> {
    let source = config.catalog_source()?;
    let mut store = CatalogStore::new();
    let catalog = store.load(source.as_ref(), config.catalog_timeout()).await?;
    let mut session =
        BookingSession::from_store(&store)?.with_gateway_timeout(config.gateway_timeout());

    let Some(model) = catalog.models.first() else {
        bail!("catalog has no models to demo");
    };
    let Some(row) = catalog.pricing_for(model.id).next() else {
        bail!("no pricing region for {}", model.code);
    };

    session.set_location(Location {
        place_name: row.city.clone(),
        city: Some(row.city.clone()),
        state: Some(row.state.clone()),
        pincode: None,
    });
    session.select_vehicle(model.id)?;

    let buyer = PersonalInfo {
        full_name: "Asha Verma".to_string(),
        email: "asha.verma@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "42 MG Road".to_string(),
        city: row.city.clone(),
        state: row.state.clone(),
        pincode: "110042".to_string(),
        terms_accepted: true,
    };

    step_banner(&session);
    println!("  {} in {}", model.name, row.region_label());

    advance(&mut session)?; // -> Insurance
    advance(&mut session)?; // -> Financing
    advance(&mut session)?; // -> Personal Info
    session.set_personal_info(buyer);
    advance(&mut session)?; // -> OTP

    let quote = session.quote();
    println!("  Grand total: {}", output::heading(&quote.grand_total.to_string()));

    let otp_gateway =
        MockOtpGateway::new(config.gateway.otp_accept_code.clone(), config.gateway_latency());
    let dispatch = session.request_otp(&otp_gateway).await?;
    println!("  OTP sent to {}", dispatch.phone);

    let entered = otp.unwrap_or_else(|| config.gateway.otp_accept_code.clone());
    session.set_otp_entry(entered);
    match session.verify_otp(&otp_gateway).await? {
        OtpOutcome::Verified => println!("  OTP {}", output::ok("verified")),
        OtpOutcome::Mismatch => bail!("the OTP code was rejected; demo cannot reach payment"),
    }

    let payment_gateway = match outcome {
        DemoOutcome::Success => MockPaymentGateway::approving(),
        DemoOutcome::Declined => MockPaymentGateway::declining("card declined by issuer"),
    }
    .with_latency(config.gateway_latency());

    match session.submit_payment(&payment_gateway).await? {
        PaymentOutcome::Confirmed { booking_id } => {
            step_banner(&session);
            println!("  Booking id: {}", output::ok(&booking_id));
        }
        PaymentOutcome::Declined { reason } => {
            step_banner(&session);
            println!("  {}", output::warn(&reason));
        }
    }
    Ok(())
}

fn advance(session: &mut BookingSession) -> Result<()> {
    match session.advance() {
        AdvanceOutcome::Advanced(_) => {
            step_banner(session);
            Ok(())
        }
        AdvanceOutcome::Blocked(report) => {
            let reasons: Vec<String> =
                report.iter().map(|(field, message)| format!("{}: {}", field, message)).collect();
            bail!("step blocked: {}", reasons.join("; "))
        }
        AdvanceOutcome::AtEnd => bail!("already at the end of the flow"),
    }
}

fn step_banner(session: &BookingSession) {
    let step = session.current_step();
    println!("{}", output::heading(&format!("[{}] {}", step.number(), step.title())));
}
