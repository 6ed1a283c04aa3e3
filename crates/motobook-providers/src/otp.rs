use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Receipt for a dispatched verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDispatch {
    pub phone: String,
    pub sent_at: DateTime<Utc>,
}

/// Verification result. A mismatch is an ordinary outcome, not an error;
/// the user re-enters the code and tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    Verified,
    Mismatch,
}

#[async_trait]
pub trait OtpGateway: Send + Sync {
    async fn send(&self, phone: &str) -> Result<OtpDispatch>;

    async fn verify(&self, phone: &str, code: &str) -> Result<OtpOutcome>;
}

/// Simulated OTP delivery: exactly one literal code verifies.
///
/// The artificial latency stands in for network delay in demos.
pub struct MockOtpGateway {
    accept_code: String,
    latency: Duration,
}

impl Default for MockOtpGateway {
    fn default() -> Self {
        MockOtpGateway { accept_code: "123456".to_string(), latency: Duration::ZERO }
    }
}

impl MockOtpGateway {
    pub fn new(accept_code: impl Into<String>, latency: Duration) -> Self {
        MockOtpGateway { accept_code: accept_code.into(), latency }
    }
}

#[async_trait]
impl OtpGateway for MockOtpGateway {
    async fn send(&self, phone: &str) -> Result<OtpDispatch> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(OtpDispatch { phone: phone.to_string(), sent_at: Utc::now() })
    }

    async fn verify(&self, _phone: &str, code: &str) -> Result<OtpOutcome> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if code == self.accept_code {
            Ok(OtpOutcome::Verified)
        } else {
            Ok(OtpOutcome::Mismatch)
        }
    }
}
