//! Wire schema of the catalog endpoint.
//!
//! The endpoint speaks camelCase; the domain model is snake_case Rust.
//! Raw rows are deserialized here and mapped into `motobook_types`, then
//! the assembled snapshot is integrity-validated: it is accepted whole
//! or not at all.

use crate::error::{Error, Result};
use motobook_types::{
    Catalog, Color, ColorId, Component, ComponentId, ComponentKind, FinanceOption,
    FinanceOptionId, FinanceProvider, FinanceProviderId, InsurancePlan, InsurancePlanId,
    InsuranceProvider, InsuranceProviderId, Model, ModelId, Money, PlanType, PricingRow,
    PricingRowId, Variant, VariantId,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WireDocument {
    status: String,
    #[serde(default)]
    data: Option<WireData>,
}

#[derive(Debug, Default, Deserialize)]
struct WireData {
    #[serde(default)]
    models: Vec<WireModel>,
    #[serde(default)]
    variants: Vec<WireVariant>,
    #[serde(default)]
    colors: Vec<WireColor>,
    #[serde(default)]
    components: Vec<WireComponent>,
    #[serde(default)]
    pricing: Vec<WirePricingRow>,
    #[serde(default)]
    insurance_providers: Vec<WireProvider>,
    #[serde(default)]
    insurance_plans: Vec<WireInsurancePlan>,
    #[serde(default)]
    finance_providers: Vec<WireProvider>,
    #[serde(default)]
    finance_options: Vec<WireFinanceOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireModel {
    id: i64,
    code: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariant {
    id: i64,
    model_id: i64,
    code: String,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price_addition: i64,
    #[serde(default)]
    is_default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireColor {
    id: i64,
    model_id: i64,
    name: String,
    #[serde(default)]
    color_start: String,
    #[serde(default)]
    color_end: String,
    #[serde(default)]
    is_default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireComponent {
    id: i64,
    model_id: i64,
    #[serde(rename = "type")]
    kind: ComponentKind,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    price: i64,
    #[serde(default)]
    is_required: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePricingRow {
    id: i64,
    model_id: i64,
    state: String,
    city: String,
    pincode_start: u32,
    pincode_end: u32,
    base_price: i64,
    #[serde(default)]
    fulfillment_fee: i64,
}

#[derive(Debug, Deserialize)]
struct WireProvider {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInsurancePlan {
    id: i64,
    provider_id: i64,
    plan_type: PlanType,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    price: i64,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    tenure_months: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFinanceOption {
    id: i64,
    provider_id: i64,
    tenure_months: u32,
    interest_rate: f64,
    #[serde(default)]
    min_down_payment: i64,
    #[serde(default)]
    processing_fee: i64,
}

/// Parse a raw endpoint body into a validated catalog snapshot.
pub fn parse_document(body: &str) -> Result<Catalog> {
    let catalog = parse_document_unvalidated(body)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Parse without the integrity pass. Used by `catalog check` to report
/// every violation instead of rejecting on the first.
pub fn parse_document_unvalidated(body: &str) -> Result<Catalog> {
    if body.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let document: WireDocument = serde_json::from_str(body)?;

    if document.status != "success" {
        return Err(Error::Document(format!("unexpected status {:?}", document.status)));
    }
    let data = document.data.ok_or_else(|| Error::Document("missing data object".to_string()))?;

    Ok(map_catalog(data))
}

fn map_catalog(data: WireData) -> Catalog {
    Catalog {
        models: data
            .models
            .into_iter()
            .map(|m| Model {
                id: ModelId(m.id),
                code: m.code,
                name: m.name,
                description: m.description,
                image_url: m.image_url,
            })
            .collect(),
        variants: data
            .variants
            .into_iter()
            .map(|v| Variant {
                id: VariantId(v.id),
                model_id: ModelId(v.model_id),
                code: v.code,
                title: v.title,
                subtitle: v.subtitle,
                description: v.description,
                price_addition: Money(v.price_addition),
                is_default: v.is_default,
            })
            .collect(),
        colors: data
            .colors
            .into_iter()
            .map(|c| Color {
                id: ColorId(c.id),
                model_id: ModelId(c.model_id),
                name: c.name,
                color_start: c.color_start,
                color_end: c.color_end,
                is_default: c.is_default,
            })
            .collect(),
        components: data
            .components
            .into_iter()
            .map(|c| Component {
                id: ComponentId(c.id),
                model_id: ModelId(c.model_id),
                kind: c.kind,
                title: c.title,
                subtitle: c.subtitle,
                description: c.description,
                price: Money(c.price),
                is_required: c.is_required,
            })
            .collect(),
        pricing: data
            .pricing
            .into_iter()
            .map(|p| PricingRow {
                id: PricingRowId(p.id),
                model_id: ModelId(p.model_id),
                state: p.state,
                city: p.city,
                pincode_start: p.pincode_start,
                pincode_end: p.pincode_end,
                base_price: Money(p.base_price),
                fulfillment_fee: Money(p.fulfillment_fee),
            })
            .collect(),
        insurance_providers: data
            .insurance_providers
            .into_iter()
            .map(|p| InsuranceProvider { id: InsuranceProviderId(p.id), name: p.name })
            .collect(),
        insurance_plans: data
            .insurance_plans
            .into_iter()
            .map(|p| InsurancePlan {
                id: InsurancePlanId(p.id),
                provider_id: InsuranceProviderId(p.provider_id),
                plan_type: p.plan_type,
                title: p.title,
                subtitle: p.subtitle,
                description: p.description,
                price: Money(p.price),
                is_required: p.is_required,
                tenure_months: p.tenure_months,
            })
            .collect(),
        finance_providers: data
            .finance_providers
            .into_iter()
            .map(|p| FinanceProvider { id: FinanceProviderId(p.id), name: p.name })
            .collect(),
        finance_options: data
            .finance_options
            .into_iter()
            .map(|o| FinanceOption {
                id: FinanceOptionId(o.id),
                provider_id: FinanceProviderId(o.provider_id),
                tenure_months: o.tenure_months,
                interest_rate: o.interest_rate,
                min_down_payment: Money(o.min_down_payment),
                processing_fee: Money(o.processing_fee),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_BODY: &str = r#"{
        "status": "success",
        "data": {
            "models": [
                {"id": 1, "code": "KM3000", "name": "KM3000", "imageUrl": ""}
            ],
            "variants": [
                {"id": 10, "modelId": 1, "code": "STD", "title": "Standard Range",
                 "priceAddition": 0, "isDefault": true}
            ],
            "colors": [
                {"id": 30, "modelId": 1, "name": "Glossy Red", "isDefault": true}
            ],
            "components": [
                {"id": 50, "modelId": 1, "type": "ACCESSORY", "title": "Helmet",
                 "price": 999, "isRequired": true}
            ],
            "pricing": [
                {"id": 70, "modelId": 1, "state": "Delhi", "city": "New Delhi",
                 "pincodeStart": 110001, "pincodeEnd": 110096,
                 "basePrice": 172500, "fulfillmentFee": 1900}
            ]
        }
    }"#;

    #[test]
    fn test_parse_minimal_document() {
        let catalog = parse_document(MINIMAL_BODY).unwrap();
        assert_eq!(catalog.models.len(), 1);
        assert_eq!(catalog.variants[0].price_addition, Money(0));
        assert_eq!(catalog.components[0].kind, ComponentKind::Accessory);
        assert!(catalog.components[0].is_required);
        assert_eq!(catalog.pricing[0].base_price, Money(172500));
    }

    #[test]
    fn test_blank_body_is_empty_response() {
        assert!(matches!(parse_document(""), Err(Error::EmptyResponse)));
        assert!(matches!(parse_document("  \n "), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(parse_document("<html>oops</html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_wrong_status_is_document_error() {
        let body = r#"{"status": "error", "data": {}}"#;
        assert!(matches!(parse_document(body), Err(Error::Document(_))));
    }

    #[test]
    fn test_missing_data_is_document_error() {
        let body = r#"{"status": "success"}"#;
        assert!(matches!(parse_document(body), Err(Error::Document(_))));
    }

    #[test]
    fn test_integrity_violation_rejects_snapshot() {
        let body = MINIMAL_BODY.replace(r#""basePrice": 172500"#, r#""basePrice": -1"#);
        assert!(matches!(parse_document(&body), Err(Error::Catalog(_))));
    }
}
