use crate::error::Result;
use async_trait::async_trait;
use motobook_types::{Money, PaymentMethod};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub amount: Money,
    pub method: PaymentMethod,
    pub customer_name: String,
    pub phone: String,
}

/// Charge result. A decline is an ordinary outcome that routes the funnel
/// to its Failure state; it is not a transport error and is never retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Confirmed { booking_id: String },
    Declined { reason: String },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentOutcome>;
}

enum Mode {
    Approve,
    Decline(String),
}

/// Simulated gateway with the two explicit outcomes the funnel exposes.
pub struct MockPaymentGateway {
    mode: Mode,
    latency: Duration,
}

impl MockPaymentGateway {
    pub fn approving() -> Self {
        MockPaymentGateway { mode: Mode::Approve, latency: Duration::ZERO }
    }

    pub fn declining(reason: impl Into<String>) -> Self {
        MockPaymentGateway { mode: Mode::Decline(reason.into()), latency: Duration::ZERO }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Mint a booking reference: "MB-" plus 8 uppercase hex characters.
fn mint_booking_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("MB-{}", id[..8].to_uppercase())
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, _request: &ChargeRequest) -> Result<PaymentOutcome> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.mode {
            Mode::Approve => Ok(PaymentOutcome::Confirmed { booking_id: mint_booking_id() }),
            Mode::Decline(reason) => Ok(PaymentOutcome::Declined { reason: reason.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChargeRequest {
        ChargeRequest {
            amount: Money(185789),
            method: PaymentMethod::FullPayment,
            customer_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
        }
    }

    #[tokio::test]
    async fn test_approving_gateway_mints_booking_id() {
        let outcome = MockPaymentGateway::approving().charge(&request()).await.unwrap();
        let PaymentOutcome::Confirmed { booking_id } = outcome else {
            panic!("expected confirmation");
        };
        assert!(booking_id.starts_with("MB-"));
        assert_eq!(booking_id.len(), 11);
        assert!(booking_id[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_declining_gateway_reports_reason() {
        let outcome =
            MockPaymentGateway::declining("insufficient funds").charge(&request()).await.unwrap();
        assert_eq!(
            outcome,
            PaymentOutcome::Declined { reason: "insufficient funds".to_string() }
        );
    }
}
