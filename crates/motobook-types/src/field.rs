use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user-editable field, used to key validation messages
/// back to the widget that should receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Location,
    Vehicle,
    Variant,
    Color,
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    Pincode,
    Terms,
    Otp,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::Vehicle => "vehicle",
            Field::Variant => "variant",
            Field::Color => "color",
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::Pincode => "pincode",
            Field::Terms => "terms",
            Field::Otp => "otp",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
