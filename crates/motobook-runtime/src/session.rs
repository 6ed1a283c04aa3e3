//! The booking session: one explicit object owning the catalog snapshot
//! and the selection state, with every mutation routed through the engine.
//!
//! Methods take `&mut self`; each user action runs to completion,
//! including its resolver cascades, before the next is processed. There is
//! exactly one mutator, so no locking.

use crate::gateway::call_gateway;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use motobook_engine::{
    Quote, StepNavigator, ValidationReport, quote, reconcile_required_components,
    reconcile_required_insurance, validate, vehicle_defaults,
};
use motobook_providers::{
    ChargeRequest, OtpDispatch, OtpGateway, OtpOutcome, PaymentGateway, PaymentOutcome,
};
use motobook_types::{
    Catalog, ColorId, ComponentId, InsurancePlanId, InsuranceProviderId, Location, ModelId,
    Money, PaymentMethod, PersonalInfo, PlanType, Selection, Step, VariantId,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Result of a gated forward move.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved to the given step.
    Advanced(Step),
    /// The current step failed validation; the report says which fields.
    Blocked(ValidationReport),
    /// Already on the last main step; payment takes over from here.
    AtEnd,
}

pub struct BookingSession {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    catalog: Arc<Catalog>,
    selection: Selection,
    navigator: StepNavigator,
    gateway_timeout: Duration,
}

impl BookingSession {
    /// Start a session over a loaded snapshot. Required core insurance is
    /// seeded immediately; required components follow the vehicle choice.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let mut selection = Selection::default();
        selection.core_plan_ids = reconcile_required_insurance(&catalog, &selection.core_plan_ids);

        BookingSession {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            selection,
            navigator: StepNavigator::new(),
            gateway_timeout: Duration::from_secs(10),
        }
    }

    /// Start a session from the store's snapshot. Fails with
    /// [`Error::CatalogNotReady`] until a load has completed.
    pub fn from_store(store: &crate::CatalogStore) -> Result<Self> {
        store.snapshot().map(Self::new).ok_or(Error::CatalogNotReady)
    }

    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_step(&self) -> Step {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    // --- location ---

    pub fn set_location(&mut self, location: Location) {
        self.selection.location = Some(location);
    }

    pub fn clear_location(&mut self) {
        self.selection.location = None;
    }

    // --- configuration ---

    /// Select a vehicle and overwrite every dependent field with its
    /// defaults. Prior variant/color/component choices never leak across a
    /// vehicle switch.
    pub fn select_vehicle(&mut self, id: ModelId) -> Result<()> {
        if self.catalog.model(id).is_none() {
            return Err(Error::UnknownId(format!("model {}", id)));
        }
        let defaults = vehicle_defaults(&self.catalog, id);
        self.selection.vehicle_id = Some(id);
        self.selection.variant_id = defaults.variant_id;
        self.selection.color_id = defaults.color_id;
        self.selection.component_ids = defaults.component_ids;
        Ok(())
    }

    pub fn select_variant(&mut self, id: VariantId) -> Result<()> {
        let model_id = self.selected_vehicle()?;
        match self.catalog.variant(id) {
            Some(variant) if variant.model_id == model_id => {
                self.selection.variant_id = Some(id);
                Ok(())
            }
            _ => Err(Error::UnknownId(format!("variant {} for model {}", id, model_id))),
        }
    }

    pub fn select_color(&mut self, id: ColorId) -> Result<()> {
        let model_id = self.selected_vehicle()?;
        match self.catalog.color(id) {
            Some(color) if color.model_id == model_id => {
                self.selection.color_id = Some(id);
                Ok(())
            }
            _ => Err(Error::UnknownId(format!("color {} for model {}", id, model_id))),
        }
    }

    /// Toggle an add-on. Deselecting a required component is a silent
    /// no-op, not an error.
    pub fn toggle_component(&mut self, id: ComponentId) -> Result<()> {
        let model_id = self.selected_vehicle()?;
        let component = match self.catalog.component(id) {
            Some(component) if component.model_id == model_id => component,
            _ => return Err(Error::UnknownId(format!("component {} for model {}", id, model_id))),
        };

        if self.selection.has_component(id) {
            if !component.is_required {
                self.selection.component_ids.retain(|c| *c != id);
            }
        } else {
            self.selection.component_ids.push(id);
        }

        self.selection.component_ids =
            reconcile_required_components(&self.catalog, model_id, &self.selection.component_ids);
        Ok(())
    }

    // --- insurance ---

    pub fn set_insurance_tenure(&mut self, months: u32) {
        self.selection.insurance_tenure_months = Some(months);
    }

    pub fn select_insurance_provider(&mut self, id: InsuranceProviderId) -> Result<()> {
        if self.catalog.insurance_providers.iter().all(|p| p.id != id) {
            return Err(Error::UnknownId(format!("insurance provider {}", id)));
        }
        self.selection.insurance_provider_id = Some(id);
        Ok(())
    }

    /// Toggle an insurance plan. Deselecting a required core plan is a
    /// silent no-op; the required set is re-unioned after every change.
    pub fn toggle_plan(&mut self, id: InsurancePlanId) -> Result<()> {
        let plan = self
            .catalog
            .insurance_plan(id)
            .ok_or_else(|| Error::UnknownId(format!("insurance plan {}", id)))?;

        let (set, shielded) = match plan.plan_type {
            PlanType::Core => (&mut self.selection.core_plan_ids, plan.is_required),
            PlanType::Additional => (&mut self.selection.additional_plan_ids, false),
        };

        if set.contains(&id) {
            if !shielded {
                set.retain(|p| *p != id);
            }
        } else {
            set.push(id);
        }

        self.selection.core_plan_ids =
            reconcile_required_insurance(&self.catalog, &self.selection.core_plan_ids);
        Ok(())
    }

    // --- financing ---

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.selection.payment_method = method;
    }

    pub fn set_loan_tenure(&mut self, months: u32) {
        self.selection.loan_tenure_months = Some(months);
    }

    pub fn set_down_payment(&mut self, amount: Money) {
        self.selection.down_payment = amount;
    }

    // --- personal info / otp entry ---

    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.selection.personal_info = info;
    }

    pub fn set_otp_entry(&mut self, code: impl Into<String>) {
        self.selection.otp_entry = code.into();
    }

    // --- quote ---

    pub fn quote(&self) -> Quote {
        quote(&self.catalog, &self.selection)
    }

    // --- navigation ---

    /// Validate the current step and move forward if it passes.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let report = validate(self.navigator.current(), &self.selection);
        if !report.is_empty() {
            return AdvanceOutcome::Blocked(report);
        }
        match self.navigator.next() {
            Some(step) => AdvanceOutcome::Advanced(step),
            None => AdvanceOutcome::AtEnd,
        }
    }

    pub fn back(&mut self) -> Option<Step> {
        self.navigator.prev()
    }

    pub fn go_to(&mut self, step: Step) {
        self.navigator.go_to(step);
    }

    /// Reset the selection and the navigator; the catalog snapshot stays.
    pub fn start_over(&mut self) {
        self.selection = Selection::default();
        self.selection.core_plan_ids =
            reconcile_required_insurance(&self.catalog, &self.selection.core_plan_ids);
        self.navigator.reset();
    }

    // --- otp / payment ---

    /// Dispatch a verification code to the buyer's phone.
    pub async fn request_otp(&mut self, gateway: &dyn OtpGateway) -> Result<OtpDispatch> {
        let phone = self.selection.personal_info.phone.clone();
        if phone.trim().is_empty() {
            return Err(Error::InvalidOperation("no phone number to send the OTP to".to_string()));
        }
        call_gateway(self.gateway_timeout, "otp send", || gateway.send(&phone)).await
    }

    /// Verify the entered code. A mismatch is a soft outcome: the step does
    /// not advance and the user may re-enter. Success marks the session
    /// payment-ready.
    pub async fn verify_otp(&mut self, gateway: &dyn OtpGateway) -> Result<OtpOutcome> {
        let phone = self.selection.personal_info.phone.clone();
        let code = self.selection.otp_entry.clone();
        let outcome =
            call_gateway(self.gateway_timeout, "otp verify", || gateway.verify(&phone, &code))
                .await?;
        if outcome == OtpOutcome::Verified {
            self.selection.otp_verified = true;
        }
        Ok(outcome)
    }

    /// Charge the grand total. Only valid on the OTP step after
    /// verification. Confirmation records the booking id and jumps to
    /// Success; a decline jumps to Failure, leaving history intact so the
    /// user can return to the OTP step and retry.
    pub async fn submit_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<PaymentOutcome> {
        if self.navigator.current() != Step::Otp {
            return Err(Error::InvalidOperation(
                "payment is only available on the OTP step".to_string(),
            ));
        }
        if !self.selection.otp_verified {
            return Err(Error::InvalidOperation(
                "verify the OTP before submitting payment".to_string(),
            ));
        }

        let request = ChargeRequest {
            amount: self.quote().grand_total,
            method: self.selection.payment_method,
            customer_name: self.selection.personal_info.full_name.clone(),
            phone: self.selection.personal_info.phone.clone(),
        };
        let outcome =
            call_gateway(self.gateway_timeout, "payment", || gateway.charge(&request)).await?;

        match &outcome {
            PaymentOutcome::Confirmed { booking_id } => {
                self.selection.booking_id = Some(booking_id.clone());
                self.navigator.go_to(Step::Success);
            }
            PaymentOutcome::Declined { .. } => {
                self.navigator.go_to(Step::Failure);
            }
        }
        Ok(outcome)
    }

    fn selected_vehicle(&self) -> Result<ModelId> {
        self.selection
            .vehicle_id
            .ok_or_else(|| Error::InvalidOperation("no vehicle selected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motobook_testing::fixtures::sample_catalog;

    fn session() -> BookingSession {
        BookingSession::new(Arc::new(sample_catalog()))
    }

    #[test]
    fn test_from_store_requires_a_loaded_snapshot() {
        let store = crate::CatalogStore::new();
        assert!(matches!(BookingSession::from_store(&store), Err(Error::CatalogNotReady)));
    }

    #[tokio::test]
    async fn test_from_store_picks_up_the_snapshot() {
        let mut store = crate::CatalogStore::new();
        let source = motobook_providers::StaticCatalogSource::new(sample_catalog());
        store.load(&source, Duration::from_secs(1)).await.unwrap();

        let session = BookingSession::from_store(&store).unwrap();
        assert!(!session.catalog().models.is_empty());
    }

    #[test]
    fn test_required_core_plans_seeded_at_start() {
        let session = session();
        assert_eq!(
            session.selection().core_plan_ids,
            vec![InsurancePlanId(90), InsurancePlanId(91)]
        );
    }

    #[test]
    fn test_select_vehicle_applies_defaults() {
        let mut session = session();
        session.select_vehicle(ModelId(1)).unwrap();

        let selection = session.selection();
        assert_eq!(selection.variant_id, Some(VariantId(10)));
        assert_eq!(selection.color_id, Some(ColorId(30)));
        assert_eq!(selection.component_ids, vec![ComponentId(50), ComponentId(52)]);
    }

    #[test]
    fn test_vehicle_switch_never_leaks_prior_state() {
        let mut session = session();
        session.select_vehicle(ModelId(1)).unwrap();
        session.select_variant(VariantId(11)).unwrap();
        session.toggle_component(ComponentId(51)).unwrap();

        session.select_vehicle(ModelId(2)).unwrap();
        let selection = session.selection();
        assert_eq!(selection.variant_id, Some(VariantId(20)));
        assert_eq!(selection.color_id, Some(ColorId(40)));
        assert_eq!(selection.component_ids, vec![ComponentId(60)]);
    }

    #[test]
    fn test_required_component_cannot_be_removed() {
        let mut session = session();
        session.select_vehicle(ModelId(1)).unwrap();

        // explicit deselect attempts on required ids are silent no-ops
        session.toggle_component(ComponentId(50)).unwrap();
        session.toggle_component(ComponentId(52)).unwrap();
        assert_eq!(
            session.selection().component_ids,
            vec![ComponentId(50), ComponentId(52)]
        );
    }

    #[test]
    fn test_optional_component_toggles_both_ways() {
        let mut session = session();
        session.select_vehicle(ModelId(1)).unwrap();

        session.toggle_component(ComponentId(51)).unwrap();
        assert!(session.selection().has_component(ComponentId(51)));
        session.toggle_component(ComponentId(51)).unwrap();
        assert!(!session.selection().has_component(ComponentId(51)));
    }

    #[test]
    fn test_component_of_other_model_is_unknown() {
        let mut session = session();
        session.select_vehicle(ModelId(1)).unwrap();
        assert!(matches!(
            session.toggle_component(ComponentId(60)),
            Err(Error::UnknownId(_))
        ));
    }

    #[test]
    fn test_required_core_plan_cannot_be_removed() {
        let mut session = session();
        session.toggle_plan(InsurancePlanId(90)).unwrap();
        assert!(session.selection().has_plan(InsurancePlanId(90)));
    }

    #[test]
    fn test_additional_plan_toggles() {
        let mut session = session();
        session.toggle_plan(InsurancePlanId(92)).unwrap();
        assert!(session.selection().has_plan(InsurancePlanId(92)));
        session.toggle_plan(InsurancePlanId(92)).unwrap();
        assert!(!session.selection().has_plan(InsurancePlanId(92)));
    }

    #[test]
    fn test_worked_example_totals() {
        let mut session = session();
        session.set_location(Location::manual("Delhi"));
        session.select_vehicle(ModelId(1)).unwrap();

        let quote = session.quote();
        assert_eq!(quote.vehicle_total, Money(174498));
        assert_eq!(quote.insurance_total, Money(10292));
        assert_eq!(quote.grand_total, Money(184790));

        session.toggle_component(ComponentId(51)).unwrap();
        let quote = session.quote();
        assert_eq!(quote.vehicle_total, Money(175497));
        assert_eq!(quote.grand_total, Money(185789));
    }

    #[test]
    fn test_adding_options_never_decreases_total() {
        let mut session = session();
        session.set_location(Location::manual("Delhi"));
        session.select_vehicle(ModelId(1)).unwrap();

        let mut last = session.quote().grand_total;
        session.toggle_component(ComponentId(51)).unwrap();
        assert!(session.quote().grand_total >= last);

        last = session.quote().grand_total;
        session.toggle_plan(InsurancePlanId(92)).unwrap();
        assert!(session.quote().grand_total >= last);

        last = session.quote().grand_total;
        session.toggle_plan(InsurancePlanId(92)).unwrap();
        assert!(session.quote().grand_total <= last);
    }

    #[test]
    fn test_advance_blocked_until_configuration_complete() {
        let mut session = session();
        let AdvanceOutcome::Blocked(report) = session.advance() else {
            panic!("expected a blocked advance");
        };
        assert!(!report.is_empty());
        assert_eq!(session.current_step(), Step::Configuration);

        session.set_location(Location::manual("Delhi"));
        session.select_vehicle(ModelId(1)).unwrap();
        assert_eq!(session.advance(), AdvanceOutcome::Advanced(Step::Insurance));
    }

    #[test]
    fn test_start_over_keeps_catalog_and_reseeds() {
        let mut session = session();
        session.set_location(Location::manual("Delhi"));
        session.select_vehicle(ModelId(1)).unwrap();
        session.advance();

        session.start_over();
        assert_eq!(session.current_step(), Step::Configuration);
        assert_eq!(session.selection().vehicle_id, None);
        assert_eq!(
            session.selection().core_plan_ids,
            vec![InsurancePlanId(90), InsurancePlanId(91)]
        );
        assert!(!session.catalog().models.is_empty());
    }
}
