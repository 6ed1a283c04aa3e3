use serde::{Deserialize, Serialize};
use std::fmt;

/// One stop in the booking funnel.
///
/// Steps 1-5 are the main flow; Success and Failure are absorbing result
/// states. Payment is an overlay on the Otp step, not a numbered step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Configuration,
    Insurance,
    Financing,
    PersonalInfo,
    Otp,
    Success,
    Failure,
}

impl Step {
    pub const MAIN_FLOW: [Step; 5] = [
        Step::Configuration,
        Step::Insurance,
        Step::Financing,
        Step::PersonalInfo,
        Step::Otp,
    ];

    /// 1-based position, contiguous across the whole sequence.
    pub fn number(&self) -> u8 {
        match self {
            Step::Configuration => 1,
            Step::Insurance => 2,
            Step::Financing => 3,
            Step::PersonalInfo => 4,
            Step::Otp => 5,
            Step::Success => 6,
            Step::Failure => 7,
        }
    }

    pub fn is_main(&self) -> bool {
        !self.is_result()
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Step::Success | Step::Failure)
    }

    /// The following main-flow step, if one exists.
    pub fn following(&self) -> Option<Step> {
        match self {
            Step::Configuration => Some(Step::Insurance),
            Step::Insurance => Some(Step::Financing),
            Step::Financing => Some(Step::PersonalInfo),
            Step::PersonalInfo => Some(Step::Otp),
            Step::Otp | Step::Success | Step::Failure => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Configuration => "Configuration",
            Step::Insurance => "Insurance",
            Step::Financing => "Financing",
            Step::PersonalInfo => "Personal Info",
            Step::Otp => "OTP Verification",
            Step::Success => "Booking Confirmed",
            Step::Failure => "Payment Failed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
