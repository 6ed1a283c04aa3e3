//! Sample catalog data shared across the workspace's tests.
//!
//! The wire body is the source of truth; the domain fixture is produced by
//! running it through the real parse path, so fixtures can never drift
//! from the endpoint schema.

use motobook_types::Catalog;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Endpoint-shaped JSON body for the sample lineup.
///
/// Model KM3000 (id 1): base ₹1,72,500 in Delhi, default variant
/// "Standard Range" (+0), default color "Glossy Red", required Helmet and
/// Saree Guard at ₹999 each, optional Smart Connectivity at ₹999. The
/// required core plans are BASE INSURANCE (₹9,942) and PERSONAL ACCIDENT
/// COVER (₹350). Model KM4000 (id 2) is a second lineup entry with no
/// default flags, exercising the list-order fallback.
pub fn sample_catalog_body() -> String {
    json!({
        "status": "success",
        "data": {
            "models": [
                {"id": 1, "code": "KM3000", "name": "KM3000",
                 "description": "Electric motorcycle", "imageUrl": "https://cdn.example.com/km3000.png"},
                {"id": 2, "code": "KM4000", "name": "KM4000",
                 "description": "Electric motorcycle", "imageUrl": "https://cdn.example.com/km4000.png"}
            ],
            "variants": [
                {"id": 10, "modelId": 1, "code": "STD", "title": "Standard Range",
                 "subtitle": "148 km range", "priceAddition": 0, "isDefault": true},
                {"id": 11, "modelId": 1, "code": "LR", "title": "Long Range",
                 "subtitle": "202 km range", "priceAddition": 15000, "isDefault": false},
                {"id": 20, "modelId": 2, "code": "BASE", "title": "Base",
                 "priceAddition": 0, "isDefault": false}
            ],
            "colors": [
                {"id": 30, "modelId": 1, "name": "Glossy Red",
                 "colorStart": "#c62828", "colorEnd": "#8e0000", "isDefault": true},
                {"id": 31, "modelId": 1, "name": "Matte Black",
                 "colorStart": "#212121", "colorEnd": "#000000", "isDefault": false},
                {"id": 40, "modelId": 2, "name": "White",
                 "colorStart": "#fafafa", "colorEnd": "#e0e0e0", "isDefault": false}
            ],
            "components": [
                {"id": 50, "modelId": 1, "type": "ACCESSORY", "title": "Helmet",
                 "price": 999, "isRequired": true},
                {"id": 51, "modelId": 1, "type": "PACKAGE", "title": "Smart Connectivity",
                 "subtitle": "App, GPS and OTA updates", "price": 999, "isRequired": false},
                {"id": 52, "modelId": 1, "type": "ACCESSORY", "title": "Saree Guard",
                 "price": 999, "isRequired": true},
                {"id": 60, "modelId": 2, "type": "ACCESSORY", "title": "Helmet",
                 "price": 999, "isRequired": true}
            ],
            "pricing": [
                {"id": 70, "modelId": 1, "state": "Delhi", "city": "New Delhi",
                 "pincodeStart": 110001, "pincodeEnd": 110096,
                 "basePrice": 172500, "fulfillmentFee": 1900},
                {"id": 71, "modelId": 1, "state": "Maharashtra", "city": "Mumbai",
                 "pincodeStart": 400001, "pincodeEnd": 400104,
                 "basePrice": 176000, "fulfillmentFee": 2100},
                {"id": 75, "modelId": 2, "state": "Delhi", "city": "New Delhi",
                 "pincodeStart": 110001, "pincodeEnd": 110096,
                 "basePrice": 198000, "fulfillmentFee": 1900}
            ],
            "insurance_providers": [
                {"id": 80, "name": "Acko"},
                {"id": 81, "name": "ICICI Lombard"}
            ],
            "insurance_plans": [
                {"id": 90, "providerId": 80, "planType": "CORE", "title": "BASE INSURANCE",
                 "price": 9942, "isRequired": true, "tenureMonths": 12},
                {"id": 91, "providerId": 80, "planType": "CORE", "title": "PERSONAL ACCIDENT COVER",
                 "price": 350, "isRequired": true, "tenureMonths": 12},
                {"id": 92, "providerId": 80, "planType": "ADDITIONAL", "title": "ZERO DEPRECIATION",
                 "price": 1200, "isRequired": false, "tenureMonths": 12},
                {"id": 93, "providerId": 81, "planType": "ADDITIONAL", "title": "ROADSIDE ASSISTANCE",
                 "price": 499, "isRequired": false, "tenureMonths": 12}
            ],
            "finance_providers": [
                {"id": 85, "name": "IDFC First"}
            ],
            "finance_options": [
                {"id": 95, "providerId": 85, "tenureMonths": 12, "interestRate": 9.5,
                 "minDownPayment": 10000, "processingFee": 999},
                {"id": 96, "providerId": 85, "tenureMonths": 24, "interestRate": 10.5,
                 "minDownPayment": 10000, "processingFee": 999},
                {"id": 97, "providerId": 85, "tenureMonths": 36, "interestRate": 11.25,
                 "minDownPayment": 10000, "processingFee": 999}
            ]
        }
    })
    .to_string()
}

/// The sample lineup as a validated domain snapshot.
pub fn sample_catalog() -> Catalog {
    motobook_providers::parse_document(&sample_catalog_body())
        .expect("sample catalog body must parse")
}

/// Write the wire body to `dir/catalog.json` and return the path.
pub fn write_catalog_file(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.json");
    std::fs::write(&path, sample_catalog_body()).expect("write sample catalog");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use motobook_types::{InsurancePlanId, ModelId};

    #[test]
    fn test_sample_catalog_parses_and_validates() {
        let catalog = sample_catalog();
        assert_eq!(catalog.models.len(), 2);
        assert!(catalog.violations().is_empty());
    }

    #[test]
    fn test_sample_catalog_required_sets() {
        let catalog = sample_catalog();
        assert_eq!(catalog.required_component_ids(ModelId(1)).len(), 2);
        assert_eq!(
            catalog.required_core_plan_ids(),
            vec![InsurancePlanId(90), InsurancePlanId(91)]
        );
    }
}
