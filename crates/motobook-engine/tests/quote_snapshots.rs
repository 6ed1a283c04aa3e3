use motobook_engine::{quote, vehicle_defaults};
use motobook_testing::fixtures::sample_catalog;
use motobook_types::{ComponentId, Location, ModelId, Money, Selection};

fn delhi_selection() -> Selection {
    let catalog = sample_catalog();
    let defaults = vehicle_defaults(&catalog, ModelId(1));

    let mut selection = Selection::default();
    selection.location = Some(Location::manual("Delhi"));
    selection.vehicle_id = Some(ModelId(1));
    selection.variant_id = defaults.variant_id;
    selection.color_id = defaults.color_id;
    selection.component_ids = defaults.component_ids;
    selection.core_plan_ids = catalog.required_core_plan_ids();
    selection
}

#[test]
fn delhi_km3000_quote() {
    let catalog = sample_catalog();
    let mut selection = delhi_selection();
    selection.component_ids.push(ComponentId(51));

    let quote = quote(&catalog, &selection);
    insta::assert_json_snapshot!(quote);
}

#[test]
fn location_text_falls_back_to_state_match() {
    let catalog = sample_catalog();
    let quote = quote(&catalog, &delhi_selection());
    assert_eq!(quote.region.as_deref(), Some("New Delhi, Delhi"));
    assert_eq!(quote.base_price, Money(172500));
    assert_eq!(quote.vehicle_total, Money(174498));
    assert_eq!(quote.grand_total, Money(184790));
}

#[test]
fn pincode_location_selects_containing_row() {
    let catalog = sample_catalog();
    let mut selection = delhi_selection();
    selection.location = Some(Location {
        place_name: "400050 Mumbai".to_string(),
        city: Some("Mumbai".to_string()),
        state: Some("Maharashtra".to_string()),
        pincode: Some(400050),
    });

    let quote = quote(&catalog, &selection);
    assert_eq!(quote.region.as_deref(), Some("Mumbai, Maharashtra"));
    assert_eq!(quote.base_price, Money(176000));
}

#[test]
fn unlocated_selection_uses_first_row_for_model() {
    let catalog = sample_catalog();
    let mut selection = delhi_selection();
    selection.location = Some(Location::manual("Nowhere Particular"));

    let quote = quote(&catalog, &selection);
    assert_eq!(quote.base_price, Money(172500));
    assert_eq!(quote.region.as_deref(), Some("New Delhi, Delhi"));
}
