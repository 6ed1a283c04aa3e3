//! Itemized quote computation.
//!
//! Financing never changes the grand total; it only changes the payment
//! structure, so the EMI block is a sub-quote attached when the payment
//! method is a loan.

use motobook_types::{Catalog, Location, ModelId, Money, PaymentMethod, PricingRow, Selection};
use serde::{Deserialize, Serialize};

/// One priced line in the quote breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    pub title: String,
    pub price: Money,
}

/// Loan payment structure for the quoted grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    pub principal: Money,
    pub down_payment: Money,
    pub tenure_months: u32,
    pub annual_interest_rate: f64,
    pub processing_fee: Money,
    pub monthly_emi: Money,
}

/// Itemized price breakdown for the current selection.
///
/// `fulfillment_fee` is display-only and excluded from every total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub model: Option<String>,
    pub region: Option<String>,
    pub base_price: Money,
    pub fulfillment_fee: Money,
    pub variant: Option<LineItem>,
    pub components: Vec<LineItem>,
    pub vehicle_total: Money,
    pub insurance: Vec<LineItem>,
    pub insurance_total: Money,
    pub grand_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi: Option<EmiQuote>,
}

/// Compute the itemized quote for a selection against a catalog snapshot.
pub fn quote(catalog: &Catalog, selection: &Selection) -> Quote {
    let mut base_price = Money::ZERO;
    let mut fulfillment_fee = Money::ZERO;
    let mut region = None;
    let mut model_name = None;
    let mut variant_line = None;
    let mut component_lines = Vec::new();

    if let Some(model_id) = selection.vehicle_id {
        model_name = catalog.model(model_id).map(|m| m.name.clone());

        if let Some(row) = locate_pricing_row(catalog, model_id, selection.location.as_ref()) {
            base_price = row.base_price;
            fulfillment_fee = row.fulfillment_fee;
            region = Some(row.region_label());
        }

        if let Some(variant) = selection.variant_id.and_then(|id| catalog.variant(id)) {
            variant_line = Some(LineItem {
                id: variant.id.value(),
                title: variant.title.clone(),
                price: variant.price_addition,
            });
        }

        for id in &selection.component_ids {
            if let Some(component) = catalog.component(*id) {
                component_lines.push(LineItem {
                    id: component.id.value(),
                    title: component.title.clone(),
                    price: component.price,
                });
            }
        }
    }

    let variant_addition = variant_line.as_ref().map(|l| l.price).unwrap_or(Money::ZERO);
    let components_total: Money = component_lines.iter().map(|l| l.price).sum();
    let vehicle_total = base_price + variant_addition + components_total;

    let insurance_lines: Vec<LineItem> = selection
        .selected_plan_ids()
        .filter_map(|id| catalog.insurance_plan(id))
        .map(|plan| LineItem { id: plan.id.value(), title: plan.title.clone(), price: plan.price })
        .collect();
    let insurance_total: Money = insurance_lines.iter().map(|l| l.price).sum();

    let grand_total = vehicle_total + insurance_total;

    let emi = match selection.payment_method {
        PaymentMethod::Loan => Some(emi_quote(catalog, selection, grand_total)),
        PaymentMethod::FullPayment => None,
    };

    Quote {
        model: model_name,
        region,
        base_price,
        fulfillment_fee,
        variant: variant_line,
        components: component_lines,
        vehicle_total,
        insurance: insurance_lines,
        insurance_total,
        grand_total,
        emi,
    }
}

/// Pricing row for the selection's location: pincode containment first,
/// then city, then state (case-insensitive), else the first row for the
/// model as a region-agnostic fallback.
fn locate_pricing_row<'a>(
    catalog: &'a Catalog,
    model_id: ModelId,
    location: Option<&Location>,
) -> Option<&'a PricingRow> {
    if let Some(location) = location {
        if let Some(pincode) = location.pincode
            && let Some(row) = catalog.pricing_for(model_id).find(|r| r.contains_pincode(pincode))
        {
            return Some(row);
        }

        let city = location.city.as_deref().unwrap_or(&location.place_name);
        if let Some(row) =
            catalog.pricing_for(model_id).find(|r| r.city.eq_ignore_ascii_case(city))
        {
            return Some(row);
        }

        let state = location.state.as_deref().unwrap_or(&location.place_name);
        if let Some(row) =
            catalog.pricing_for(model_id).find(|r| r.state.eq_ignore_ascii_case(state))
        {
            return Some(row);
        }
    }

    catalog.pricing_for(model_id).next()
}

fn emi_quote(catalog: &Catalog, selection: &Selection, grand_total: Money) -> EmiQuote {
    let option = catalog.finance_option_for_tenure(selection.loan_tenure_months.unwrap_or(0));
    let tenure_months = selection
        .loan_tenure_months
        .or(option.map(|o| o.tenure_months))
        .unwrap_or(0);
    let annual_interest_rate = option.map(|o| o.interest_rate).unwrap_or(0.0);
    let processing_fee = option.map(|o| o.processing_fee).unwrap_or(Money::ZERO);
    let principal = grand_total - selection.down_payment;

    EmiQuote {
        principal,
        down_payment: selection.down_payment,
        tenure_months,
        annual_interest_rate,
        processing_fee,
        monthly_emi: monthly_emi(principal, annual_interest_rate, tenure_months),
    }
}

/// Equated monthly installment, rounded half-up to whole rupees.
pub fn monthly_emi(principal: Money, annual_interest_rate: f64, tenure_months: u32) -> Money {
    if principal.amount() <= 0 || tenure_months == 0 {
        return Money::ZERO;
    }

    let p = principal.amount() as f64;
    let n = tenure_months as f64;
    let monthly_rate = annual_interest_rate / 12.0 / 100.0;

    if monthly_rate == 0.0 {
        return Money(round_half_up(p / n));
    }

    let factor = (1.0 + monthly_rate).powi(tenure_months as i32);
    Money(round_half_up(p * monthly_rate * factor / (factor - 1.0)))
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
