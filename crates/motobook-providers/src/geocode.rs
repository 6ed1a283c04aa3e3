//! Location search over the catalog's pricing regions.
//!
//! Stands in for a real geocoding provider: the pricing rows are the only
//! geography the funnel knows, so they double as the search corpus.

use crate::error::Result;
use motobook_types::{Catalog, Location};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ASCII class on purpose: `\d` would also match non-ASCII decimal digits,
// which `u32::from_str` rejects.
static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("pincode regex"));

fn parse_pincode(query: &str) -> Option<u32> {
    if PINCODE_RE.is_match(query) { query.parse().ok() } else { None }
}

/// One geocoding hit, convertible into a selection [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceMatch {
    pub id: i64,
    pub place_name: String,
    /// "City, State" display context.
    pub context: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<u32>,
}

impl PlaceMatch {
    pub fn to_location(&self) -> Location {
        Location {
            place_name: self.place_name.clone(),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            pincode: self.pincode,
        }
    }
}

pub trait Geocoder: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<PlaceMatch>>;
}

/// Mock geocoder over the catalog's pricing rows.
///
/// A 6-digit query is a pincode matched by range containment; any other
/// query of at least 3 characters substring-matches city and state
/// case-insensitively. Shorter queries return nothing. Results are
/// deduplicated by (city, state).
pub struct RegionGeocoder {
    catalog: Arc<Catalog>,
}

impl RegionGeocoder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        RegionGeocoder { catalog }
    }
}

impl Geocoder for RegionGeocoder {
    fn search(&self, query: &str) -> Result<Vec<PlaceMatch>> {
        let query = query.trim();
        let mut matches = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        if let Some(pincode) = parse_pincode(query) {
            for row in &self.catalog.pricing {
                if row.contains_pincode(pincode)
                    && seen.insert((row.city.to_lowercase(), row.state.to_lowercase()))
                {
                    matches.push(PlaceMatch {
                        id: row.id.value(),
                        place_name: format!("{} {}", query, row.city),
                        context: row.region_label(),
                        city: row.city.clone(),
                        state: row.state.clone(),
                        pincode: Some(pincode),
                    });
                }
            }
            return Ok(matches);
        }

        if query.len() < 3 {
            return Ok(matches);
        }

        let needle = query.to_lowercase();
        for row in &self.catalog.pricing {
            let hit = row.city.to_lowercase().contains(&needle)
                || row.state.to_lowercase().contains(&needle);
            if hit && seen.insert((row.city.to_lowercase(), row.state.to_lowercase())) {
                matches.push(PlaceMatch {
                    id: row.id.value(),
                    place_name: row.city.clone(),
                    context: row.region_label(),
                    city: row.city.clone(),
                    state: row.state.clone(),
                    pincode: None,
                });
            }
        }
        Ok(matches)
    }
}
