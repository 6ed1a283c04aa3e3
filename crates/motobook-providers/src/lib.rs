pub mod catalog;
pub mod error;
pub mod geocode;
pub mod otp;
pub mod payment;
pub mod schema;

pub use catalog::{CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource};
pub use error::{Error, Result};
pub use geocode::{Geocoder, PlaceMatch, RegionGeocoder};
pub use otp::{MockOtpGateway, OtpDispatch, OtpGateway, OtpOutcome};
pub use payment::{ChargeRequest, MockPaymentGateway, PaymentGateway, PaymentOutcome};
pub use schema::{parse_document, parse_document_unvalidated};
