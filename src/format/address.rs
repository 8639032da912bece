//! Two-line address labels
//!
//! Turns a geocoding candidate into a primary line (what the place is) and a
//! secondary line (where it is).

use crate::geo::GeocodeCandidate;
use serde::{Deserialize, Serialize};

/// Display label for a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAddress {
    pub primary: String,
    pub secondary: String,
}

/// Full state name to postal abbreviation
const STATE_ABBREVIATIONS: [(&str, &str); 8] = [
    ("New South Wales", "NSW"),
    ("Victoria", "VIC"),
    ("Queensland", "QLD"),
    ("Western Australia", "WA"),
    ("South Australia", "SA"),
    ("Tasmania", "TAS"),
    ("Northern Territory", "NT"),
    ("Australian Capital Territory", "ACT"),
];

/// Abbreviate an Australian state name; anything else is returned unchanged
pub fn abbreviate_state(state: &str) -> &str {
    STATE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == state)
        .map_or(state, |(_, abbrev)| *abbrev)
}

/// Compute the display label for a candidate
pub fn format_address(candidate: &GeocodeCandidate) -> FormattedAddress {
    let addr = &candidate.address;
    let house_number = addr.house_number.as_deref();
    let road = addr.road.as_deref();
    let suburb = addr.suburb.as_deref();
    let locality = addr.locality.as_deref();
    let town = addr.town.as_deref();
    let city = addr.city.as_deref();

    let mut secondary: Vec<String> = Vec::new();
    let nearest_area = || suburb.or(locality).or(town).or(city);

    let primary = match (house_number, road, suburb.or(locality).or(town)) {
        (Some(number), Some(road), _) => {
            secondary.extend(nearest_area().map(str::to_string));
            format!("{} {}", number, road)
        }
        (None, Some(road), _) => {
            secondary.extend(nearest_area().map(str::to_string));
            road.to_string()
        }
        (_, None, Some(area)) => {
            if let Some(city) = city.filter(|c| *c != area) {
                secondary.push(city.to_string());
            }
            area.to_string()
        }
        (_, None, None) => match city {
            Some(city) => city.to_string(),
            None => {
                let mut parts = candidate.display_name.split(',').map(str::trim);
                let first = parts.next().unwrap_or_default().to_string();
                if let Some(second) = parts.next() {
                    secondary.push(second.to_string());
                }
                first
            }
        },
    };

    if let Some(state) = addr.state.as_deref() {
        let abbrev = abbreviate_state(state);
        if !secondary
            .iter()
            .any(|part| part.contains(abbrev) || part.contains(state))
        {
            secondary.push(abbrev.to_string());
        }
    }

    if let Some(postcode) = addr.postcode.as_deref() {
        secondary.push(postcode.to_string());
    }

    FormattedAddress {
        primary,
        secondary: secondary.join(", "),
    }
}
