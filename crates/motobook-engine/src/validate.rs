//! Per-step field validation.
//!
//! Validation never raises; it always returns a report the host renders
//! inline. An empty report permits forward navigation; a non-empty one
//! blocks it, with the first field designated for focus.

use motobook_types::{Field, Selection, Step};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Ordered field → message map produced by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    entries: Vec<(Field, String)>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The field that should receive UI focus.
    pub fn focus_field(&self) -> Option<Field> {
        self.entries.first().map(|(field, _)| *field)
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn require(&mut self, ok: bool, field: Field, message: &str) {
        if !ok {
            self.entries.push((field, message.to_string()));
        }
    }
}

/// Validate the slice of the selection the given step edits.
///
/// Insurance, Financing and the result states have no rules and are always
/// valid.
pub fn validate(step: Step, selection: &Selection) -> ValidationReport {
    let mut report = ValidationReport::default();

    match step {
        Step::Configuration => {
            let located = selection
                .location
                .as_ref()
                .is_some_and(|l| !l.place_name.trim().is_empty());
            report.require(located, Field::Location, "Enter a delivery location");
            report.require(selection.vehicle_id.is_some(), Field::Vehicle, "Select a vehicle");
            report.require(selection.variant_id.is_some(), Field::Variant, "Select a variant");
            report.require(selection.color_id.is_some(), Field::Color, "Select a color");
        }
        Step::PersonalInfo => {
            let info = &selection.personal_info;
            report.require(
                is_full_name(&info.full_name),
                Field::FullName,
                "Enter your first and last name",
            );
            report.require(
                EMAIL_RE.is_match(info.email.trim()),
                Field::Email,
                "Enter a valid email address",
            );
            report.require(
                digit_count(&info.phone) == 10,
                Field::Phone,
                "Enter a 10-digit phone number",
            );
            report.require(!info.address.trim().is_empty(), Field::Address, "Enter your address");
            report.require(!info.city.trim().is_empty(), Field::City, "Enter your city");
            report.require(!info.state.trim().is_empty(), Field::State, "Enter your state");
            report.require(
                is_exact_digits(info.pincode.trim(), 6),
                Field::Pincode,
                "Enter a 6-digit pincode",
            );
            report.require(
                info.terms_accepted,
                Field::Terms,
                "Accept the terms and conditions",
            );
        }
        Step::Otp => {
            report.require(
                is_exact_digits(selection.otp_entry.trim(), 6),
                Field::Otp,
                "Enter the 6-digit code",
            );
        }
        Step::Insurance | Step::Financing | Step::Success | Step::Failure => {}
    }

    report
}

/// At least two whitespace-separated alphabetic tokens.
fn is_full_name(name: &str) -> bool {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    tokens.len() >= 2 && tokens.iter().all(|t| t.chars().all(|c| c.is_alphabetic()))
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn is_exact_digits(value: &str, count: usize) -> bool {
    value.len() == count && value.chars().all(|c| c.is_ascii_digit())
}
