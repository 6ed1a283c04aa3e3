use crate::error::{CatalogError, Result};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ModelId);
id_newtype!(VariantId);
id_newtype!(ColorId);
id_newtype!(ComponentId);
id_newtype!(PricingRowId);
id_newtype!(InsuranceProviderId);
id_newtype!(InsurancePlanId);
id_newtype!(FinanceProviderId);
id_newtype!(FinanceOptionId);

/// One vehicle line (e.g. "KM3000").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// A trim level of a model. `price_addition` is added on top of the
/// model's located base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub model_id: ModelId,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub price_addition: Money,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub model_id: ModelId,
    pub name: String,
    #[serde(default)]
    pub color_start: String,
    #[serde(default)]
    pub color_end: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    Accessory,
    Package,
    Warranty,
    Service,
    Other,
}

/// An add-on for a model: accessory, package, warranty or service plan.
///
/// Required components are continuously enforced members of the selection's
/// component set while their model is selected; the user cannot remove them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub model_id: ModelId,
    pub kind: ComponentKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub is_required: bool,
}

/// Region-priced base price row. Also the corpus for the mock geocoder.
///
/// `fulfillment_fee` is carried for display only; it is not part of any
/// computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRow {
    pub id: PricingRowId,
    pub model_id: ModelId,
    pub state: String,
    pub city: String,
    pub pincode_start: u32,
    pub pincode_end: u32,
    pub base_price: Money,
    pub fulfillment_fee: Money,
}

impl PricingRow {
    pub fn contains_pincode(&self, pincode: u32) -> bool {
        self.pincode_start <= pincode && pincode <= self.pincode_end
    }

    pub fn region_label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Core,
    Additional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: InsuranceProviderId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePlan {
    pub id: InsurancePlanId,
    pub provider_id: InsuranceProviderId,
    pub plan_type: PlanType,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub is_required: bool,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceProvider {
    pub id: FinanceProviderId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceOption {
    pub id: FinanceOptionId,
    pub provider_id: FinanceProviderId,
    pub tenure_months: u32,
    /// Annual interest rate in percent (e.g. 9.5).
    pub interest_rate: f64,
    pub min_down_payment: Money,
    pub processing_fee: Money,
}

/// Immutable product data snapshot, fetched once per booking session.
///
/// Default selection ties resolve by list order: the row marked
/// `is_default` wins, otherwise the first row for the model. More than one
/// marked default per model is a data-quality violation rejected by
/// [`Catalog::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<Model>,
    pub variants: Vec<Variant>,
    pub colors: Vec<Color>,
    pub components: Vec<Component>,
    pub pricing: Vec<PricingRow>,
    pub insurance_providers: Vec<InsuranceProvider>,
    pub insurance_plans: Vec<InsurancePlan>,
    pub finance_providers: Vec<FinanceProvider>,
    pub finance_options: Vec<FinanceOption>,
}

impl Catalog {
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn model_by_code(&self, code: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.code.eq_ignore_ascii_case(code))
    }

    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn color(&self, id: ColorId) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn insurance_plan(&self, id: InsurancePlanId) -> Option<&InsurancePlan> {
        self.insurance_plans.iter().find(|p| p.id == id)
    }

    pub fn variants_for(&self, model_id: ModelId) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(move |v| v.model_id == model_id)
    }

    pub fn colors_for(&self, model_id: ModelId) -> impl Iterator<Item = &Color> {
        self.colors.iter().filter(move |c| c.model_id == model_id)
    }

    pub fn components_for(&self, model_id: ModelId) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.model_id == model_id)
    }

    pub fn pricing_for(&self, model_id: ModelId) -> impl Iterator<Item = &PricingRow> {
        self.pricing.iter().filter(move |p| p.model_id == model_id)
    }

    /// Default variant of a model: the row marked `is_default`, else the
    /// first row in list order.
    pub fn default_variant(&self, model_id: ModelId) -> Option<&Variant> {
        self.variants_for(model_id)
            .find(|v| v.is_default)
            .or_else(|| self.variants_for(model_id).next())
    }

    pub fn default_color(&self, model_id: ModelId) -> Option<&Color> {
        self.colors_for(model_id)
            .find(|c| c.is_default)
            .or_else(|| self.colors_for(model_id).next())
    }

    /// Mandatory add-on ids for a model, in catalog list order.
    pub fn required_component_ids(&self, model_id: ModelId) -> Vec<ComponentId> {
        self.components_for(model_id)
            .filter(|c| c.is_required)
            .map(|c| c.id)
            .collect()
    }

    /// Mandatory core insurance plan ids, catalog-wide. Provider choice only
    /// filters what a host displays; it does not shrink the required set.
    pub fn required_core_plan_ids(&self) -> Vec<InsurancePlanId> {
        self.insurance_plans
            .iter()
            .filter(|p| p.plan_type == PlanType::Core && p.is_required)
            .map(|p| p.id)
            .collect()
    }

    /// Finance option matching the chosen tenure, else the first option.
    pub fn finance_option_for_tenure(&self, tenure_months: u32) -> Option<&FinanceOption> {
        self.finance_options
            .iter()
            .find(|o| o.tenure_months == tenure_months)
            .or_else(|| self.finance_options.first())
    }

    /// Reject the snapshot on the first data-quality violation.
    pub fn validate(&self) -> Result<()> {
        match self.violations().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Collect every data-quality violation in the snapshot.
    pub fn violations(&self) -> Vec<CatalogError> {
        let mut violations = Vec::new();

        check_unique_ids(&mut violations, "model", self.models.iter().map(|m| m.id.0));
        check_unique_ids(&mut violations, "variant", self.variants.iter().map(|v| v.id.0));
        check_unique_ids(&mut violations, "color", self.colors.iter().map(|c| c.id.0));
        check_unique_ids(&mut violations, "component", self.components.iter().map(|c| c.id.0));
        check_unique_ids(&mut violations, "pricing row", self.pricing.iter().map(|p| p.id.0));
        check_unique_ids(
            &mut violations,
            "insurance provider",
            self.insurance_providers.iter().map(|p| p.id.0),
        );
        check_unique_ids(
            &mut violations,
            "insurance plan",
            self.insurance_plans.iter().map(|p| p.id.0),
        );
        check_unique_ids(
            &mut violations,
            "finance provider",
            self.finance_providers.iter().map(|p| p.id.0),
        );
        check_unique_ids(
            &mut violations,
            "finance option",
            self.finance_options.iter().map(|o| o.id.0),
        );

        let model_ids: HashSet<i64> = self.models.iter().map(|m| m.id.0).collect();
        let insurer_ids: HashSet<i64> = self.insurance_providers.iter().map(|p| p.id.0).collect();
        let financier_ids: HashSet<i64> = self.finance_providers.iter().map(|p| p.id.0).collect();

        for variant in &self.variants {
            if !model_ids.contains(&variant.model_id.0) {
                violations.push(CatalogError::UnknownModel {
                    entity: "variant",
                    id: variant.id.0,
                    model_id: variant.model_id.0,
                });
            }
            if variant.price_addition.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "variant",
                    id: variant.id.0,
                    field: "price_addition",
                });
            }
        }

        for color in &self.colors {
            if !model_ids.contains(&color.model_id.0) {
                violations.push(CatalogError::UnknownModel {
                    entity: "color",
                    id: color.id.0,
                    model_id: color.model_id.0,
                });
            }
        }

        for component in &self.components {
            if !model_ids.contains(&component.model_id.0) {
                violations.push(CatalogError::UnknownModel {
                    entity: "component",
                    id: component.id.0,
                    model_id: component.model_id.0,
                });
            }
            if component.price.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "component",
                    id: component.id.0,
                    field: "price",
                });
            }
        }

        for row in &self.pricing {
            if !model_ids.contains(&row.model_id.0) {
                violations.push(CatalogError::UnknownModel {
                    entity: "pricing row",
                    id: row.id.0,
                    model_id: row.model_id.0,
                });
            }
            if row.base_price.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "pricing row",
                    id: row.id.0,
                    field: "base_price",
                });
            }
            if row.fulfillment_fee.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "pricing row",
                    id: row.id.0,
                    field: "fulfillment_fee",
                });
            }
        }

        for plan in &self.insurance_plans {
            if !insurer_ids.contains(&plan.provider_id.0) {
                violations.push(CatalogError::UnknownProvider {
                    entity: "insurance plan",
                    id: plan.id.0,
                    provider_id: plan.provider_id.0,
                });
            }
            if plan.price.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "insurance plan",
                    id: plan.id.0,
                    field: "price",
                });
            }
        }

        for option in &self.finance_options {
            if !financier_ids.contains(&option.provider_id.0) {
                violations.push(CatalogError::UnknownProvider {
                    entity: "finance option",
                    id: option.id.0,
                    provider_id: option.provider_id.0,
                });
            }
            if option.tenure_months == 0 {
                violations.push(CatalogError::InvalidFinanceOption {
                    id: option.id.0,
                    reason: "tenure_months must be positive",
                });
            }
            if option.interest_rate < 0.0 {
                violations.push(CatalogError::InvalidFinanceOption {
                    id: option.id.0,
                    reason: "interest_rate must not be negative",
                });
            }
            if option.min_down_payment.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "finance option",
                    id: option.id.0,
                    field: "min_down_payment",
                });
            }
            if option.processing_fee.is_negative() {
                violations.push(CatalogError::NegativePrice {
                    entity: "finance option",
                    id: option.id.0,
                    field: "processing_fee",
                });
            }
        }

        for model in &self.models {
            let defaults = self.variants_for(model.id).filter(|v| v.is_default).count();
            if defaults > 1 {
                violations.push(CatalogError::DuplicateDefaultVariant { model_id: model.id.0 });
            }
            let defaults = self.colors_for(model.id).filter(|c| c.is_default).count();
            if defaults > 1 {
                violations.push(CatalogError::DuplicateDefaultColor { model_id: model.id.0 });
            }
        }

        violations
    }
}

fn check_unique_ids(
    violations: &mut Vec<CatalogError>,
    entity: &'static str,
    ids: impl Iterator<Item = i64>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            violations.push(CatalogError::DuplicateId { entity, id });
        }
    }
}
