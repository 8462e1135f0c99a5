use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State selected before the user has hovered anything.
pub const DEFAULT_STATE: &str = "IN-MH";

/// Name shown when the selected code has no entry in the catalog.
pub const PLACEHOLDER_NAME: &str = "State";

/// A state or union territory as placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn region(code: &'static str, name: &'static str, lat: f64, lon: f64) -> Region {
    Region {
        code,
        name,
        lat,
        lon,
    }
}

/// The 36 fixed regions, positioned at their approximate centroids.
pub const REGIONS: [Region; 36] = [
    region("IN-AN", "Andaman & Nicobar", 11.7, 92.7),
    region("IN-AP", "Andhra Pradesh", 15.9, 79.7),
    region("IN-AR", "Arunachal Pradesh", 28.2, 94.7),
    region("IN-AS", "Assam", 26.2, 92.9),
    region("IN-BR", "Bihar", 25.1, 85.3),
    region("IN-CH", "Chandigarh", 30.7, 76.8),
    region("IN-CT", "Chhattisgarh", 21.3, 81.9),
    region("IN-DD", "Daman & Diu", 20.4, 72.8),
    region("IN-DL", "Delhi", 28.7, 77.1),
    region("IN-DN", "Dadra & Nagar Haveli", 20.2, 73.0),
    region("IN-GA", "Goa", 15.3, 74.1),
    region("IN-GJ", "Gujarat", 22.3, 71.2),
    region("IN-HP", "Himachal Pradesh", 31.9, 77.2),
    region("IN-HR", "Haryana", 29.1, 76.1),
    region("IN-JH", "Jharkhand", 23.6, 85.3),
    region("IN-JK", "Jammu & Kashmir", 33.8, 75.6),
    region("IN-KA", "Karnataka", 15.0, 75.7),
    region("IN-KL", "Kerala", 10.3, 76.4),
    region("IN-LD", "Lakshadweep", 10.6, 72.6),
    region("IN-MP", "Madhya Pradesh", 23.5, 78.7),
    region("IN-MH", "Maharashtra", 19.3, 76.2),
    region("IN-ML", "Meghalaya", 25.5, 91.4),
    region("IN-MN", "Manipur", 24.7, 93.9),
    region("IN-MZ", "Mizoram", 23.2, 92.9),
    region("IN-NL", "Nagaland", 26.2, 94.6),
    region("IN-OR", "Odisha", 20.5, 84.5),
    region("IN-PB", "Punjab", 31.1, 75.3),
    region("IN-PY", "Puducherry", 11.9, 79.8),
    region("IN-RJ", "Rajasthan", 26.6, 73.8),
    region("IN-SK", "Sikkim", 27.5, 88.5),
    region("IN-TN", "Tamil Nadu", 11.1, 78.4),
    region("IN-TG", "Telangana", 17.9, 79.0),
    region("IN-TR", "Tripura", 23.9, 91.7),
    region("IN-UP", "Uttar Pradesh", 26.8, 80.9),
    region("IN-UT", "Uttarakhand", 30.1, 79.2),
    region("IN-WB", "West Bengal", 23.4, 87.9),
];

pub fn find_region(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|region| region.code == code)
}

pub fn state_name(code: &str) -> Option<&'static str> {
    find_region(code).map(|region| region.name)
}

pub fn is_known_state(code: &str) -> bool {
    find_region(code).is_some()
}

/// Per-state counters. Wire names are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateStat {
    pub name: String,
    pub companies: u64,
    pub hired_internships: u64,
    pub pm_internships: u64,
    pub active_internships: u64,
    pub students_hired: u64,
}

impl StateStat {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Zero-valued record shown for codes missing from the catalog.
    pub fn placeholder() -> Self {
        Self::empty(PLACEHOLDER_NAME)
    }

    pub const fn has_activity(&self) -> bool {
        self.companies > 0 || self.active_internships > 0
    }
}

/// Aggregate counters for the whole country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStat {
    pub total_companies: u64,
    pub total_internships: u64,
    pub active_internships: u64,
    pub closed_internships: u64,
    pub pm_internships: u64,
    pub total_applications: u64,
    pub students_hired: u64,
}

/// State code to statistics, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, StateStat>,
}

impl Catalog {
    /// All 36 regions with their names and zeroed counters.
    pub fn initial() -> Self {
        REGIONS
            .iter()
            .map(|region| (region.code.to_string(), StateStat::empty(region.name)))
            .collect()
    }

    pub fn get(&self, code: &str) -> Option<&StateStat> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateStat)> {
        self.entries
            .iter()
            .map(|(code, stats)| (code.as_str(), stats))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// True when no entry reports companies or active internships.
    pub fn is_database_empty(&self) -> bool {
        !self.entries.values().any(StateStat::has_activity)
    }

    pub fn max_active_internships(&self) -> u64 {
        self.entries
            .values()
            .map(|stats| stats.active_internships)
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(String, StateStat)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, StateStat)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
