use crate::catalog::{ColorId, ComponentId, InsurancePlanId, InsuranceProviderId, ModelId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Where the vehicle will be delivered; produced by the geocoder or typed
/// in manually. `pincode` is only set when the entry came from a pincode
/// query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub place_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<u32>,
}

impl Location {
    pub fn manual(text: impl Into<String>) -> Self {
        Location { place_name: text.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    FullPayment,
    Loan,
}

/// Buyer contact details collected on the personal-info step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub terms_accepted: bool,
}

/// The mutable record of a user's in-progress booking choices.
///
/// Component and plan sets are insertion-ordered and duplicate-free. All
/// mutation beyond plain field writes goes through the engine (dependency
/// resolver, validation) so the required-add-on invariants hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub location: Option<Location>,
    pub vehicle_id: Option<ModelId>,
    pub variant_id: Option<VariantId>,
    pub color_id: Option<ColorId>,
    pub component_ids: Vec<ComponentId>,
    pub insurance_tenure_months: Option<u32>,
    pub insurance_provider_id: Option<InsuranceProviderId>,
    pub core_plan_ids: Vec<InsurancePlanId>,
    pub additional_plan_ids: Vec<InsurancePlanId>,
    pub payment_method: PaymentMethod,
    pub loan_tenure_months: Option<u32>,
    pub down_payment: Money,
    pub personal_info: PersonalInfo,
    pub otp_entry: String,
    pub otp_verified: bool,
    pub booking_id: Option<String>,
}

impl Selection {
    pub fn has_component(&self, id: ComponentId) -> bool {
        self.component_ids.contains(&id)
    }

    pub fn has_plan(&self, id: InsurancePlanId) -> bool {
        self.core_plan_ids.contains(&id) || self.additional_plan_ids.contains(&id)
    }

    /// All selected insurance plan ids, core first, insertion order kept.
    pub fn selected_plan_ids(&self) -> impl Iterator<Item = InsurancePlanId> + '_ {
        self.core_plan_ids.iter().chain(self.additional_plan_ids.iter()).copied()
    }
}
