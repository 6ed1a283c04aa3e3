pub mod navigator;
pub mod pricing;
pub mod resolver;
pub mod validate;

pub use navigator::StepNavigator;
pub use pricing::{EmiQuote, LineItem, Quote, quote};
pub use resolver::{
    VehicleDefaults, reconcile_required_components, reconcile_required_insurance,
    vehicle_defaults,
};
pub use validate::{ValidationReport, validate};
