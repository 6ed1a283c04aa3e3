//! Selection-dependency resolution.
//!
//! Every vehicle change recomputes the dependent defaults; every component
//! or plan mutation re-unions the mandatory set back in. Callers overwrite
//! the selection's dependent fields with the resolved values entirely;
//! switching vehicles never merges old state in.

use motobook_types::{Catalog, ColorId, ComponentId, InsurancePlanId, ModelId, VariantId};

/// Dependent defaults for a newly selected vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDefaults {
    pub variant_id: Option<VariantId>,
    pub color_id: Option<ColorId>,
    pub component_ids: Vec<ComponentId>,
}

/// Compute the default variant, default color and mandatory component set
/// for a model. Optional components are never auto-selected.
pub fn vehicle_defaults(catalog: &Catalog, model_id: ModelId) -> VehicleDefaults {
    VehicleDefaults {
        variant_id: catalog.default_variant(model_id).map(|v| v.id),
        color_id: catalog.default_color(model_id).map(|c| c.id),
        component_ids: catalog.required_component_ids(model_id),
    }
}

/// Union the model's required component ids back into the current set.
///
/// Never removes anything the user chose; only adds missing mandatory
/// ids, in catalog list order, after the user's picks.
pub fn reconcile_required_components(
    catalog: &Catalog,
    model_id: ModelId,
    current: &[ComponentId],
) -> Vec<ComponentId> {
    let mut reconciled = current.to_vec();
    for id in catalog.required_component_ids(model_id) {
        if !reconciled.contains(&id) {
            reconciled.push(id);
        }
    }
    reconciled
}

/// Same union pattern for required core insurance plans (catalog-wide).
pub fn reconcile_required_insurance(
    catalog: &Catalog,
    current_core: &[InsurancePlanId],
) -> Vec<InsurancePlanId> {
    let mut reconciled = current_core.to_vec();
    for id in catalog.required_core_plan_ids() {
        if !reconciled.contains(&id) {
            reconciled.push(id);
        }
    }
    reconciled
}
