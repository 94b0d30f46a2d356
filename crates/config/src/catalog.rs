//! School catalog: campuses, programs, course starts, tuition.
//!
//! The catalog is static reference data injected at construction time.
//! [`ProgramCampusMap`] is derived from it and is the only place that decides
//! which campus teaches which program.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use enrollwise_core::{Campus, Language, normalize};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Static description of the school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolCatalog {
    #[serde(default = "default_school_name")]
    pub school_name: String,

    /// Name the assistant introduces itself with.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    #[serde(default = "default_campuses")]
    pub campuses: Vec<CampusInfo>,

    #[serde(default = "default_programs")]
    pub programs: Vec<ProgramEntry>,

    /// Upcoming course starts. Past entries are filtered at render time.
    #[serde(default)]
    pub schedule: Vec<CourseStart>,

    #[serde(default)]
    pub pricing: Vec<PriceEntry>,
}

fn default_school_name() -> String {
    "International Beauty School".into()
}
fn default_assistant_name() -> String {
    "Ava".into()
}

fn default_campuses() -> Vec<CampusInfo> {
    vec![
        CampusInfo {
            campus: Campus::NewYork,
            label: "New York".into(),
            address: "1501 Broadway Suite 700, New York, NY 10036".into(),
        },
        CampusInfo {
            campus: Campus::NewJersey,
            label: "New Jersey".into(),
            address: "201 Willowbrook Blvd 8th Floor, Wayne, NJ 07470".into(),
        },
    ]
}

fn program(name: &str, aliases: &[&str], hours: Option<u32>, campuses: &[Campus]) -> ProgramEntry {
    ProgramEntry {
        name: name.into(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        hours,
        campuses: campuses.to_vec(),
    }
}

fn default_programs() -> Vec<ProgramEntry> {
    use Campus::{NewJersey, NewYork};
    vec![
        program("esthetics", &["esthetician", "facials", "estetica"], Some(600), &[NewYork, NewJersey]),
        program("nails", &["nail", "manicure", "manicurist", "uñas"], None, &[NewYork, NewJersey]),
        program("waxing", &["wax", "depilacion"], None, &[NewYork]),
        program("makeup", &["make up", "maquillaje"], None, &[NewYork]),
        program("cidesco", &["cidesco esthetics", "ae cidesco"], None, &[NewYork]),
        program("barbering", &["barber", "barberia"], None, &[NewJersey]),
        program("cosmetology", &["cosmetologia"], None, &[NewJersey]),
    ]
}

impl Default for SchoolCatalog {
    fn default() -> Self {
        Self {
            school_name: default_school_name(),
            assistant_name: default_assistant_name(),
            campuses: default_campuses(),
            programs: default_programs(),
            schedule: vec![],
            pricing: vec![],
        }
    }
}

/// One physical location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusInfo {
    pub campus: Campus,
    pub label: String,
    pub address: String,
}

/// A program and the campuses that teach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramEntry {
    pub name: String,

    /// Alternative spellings that map to the same campuses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,

    pub campuses: Vec<Campus>,
}

/// A scheduled course start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseStart {
    pub category: String,
    pub program: String,
    pub start_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,

    #[serde(default)]
    pub language: Language,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<Campus>,
}

/// Published tuition for a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub program: String,
    pub tuition_usd: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SchoolCatalog {
    /// Validate the catalog. Building the program map is the main check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.campuses.is_empty() {
            return Err(ConfigError::CatalogError("at least one campus is required".into()));
        }
        if let Some(info) = self.campuses.iter().find(|c| c.campus == Campus::Unknown) {
            return Err(ConfigError::CatalogError(format!(
                "campus '{}' must be new_york or new_jersey",
                info.label
            )));
        }
        for course in &self.schedule {
            if let Some(end) = course.end_date
                && end < course.start_date
            {
                return Err(ConfigError::CatalogError(format!(
                    "course '{}' ends ({end}) before it starts ({})",
                    course.program, course.start_date
                )));
            }
        }
        ProgramCampusMap::from_programs(&self.programs)?;
        Ok(())
    }

    /// Derive the program → campus map.
    pub fn program_map(&self) -> Result<ProgramCampusMap, ConfigError> {
        ProgramCampusMap::from_programs(&self.programs)
    }

    /// Course starts on or after `today`, soonest first.
    pub fn upcoming_courses(&self, today: NaiveDate) -> Vec<&CourseStart> {
        let mut upcoming: Vec<&CourseStart> = self
            .schedule
            .iter()
            .filter(|c| c.start_date >= today)
            .collect();
        upcoming.sort_by_key(|c| c.start_date);
        upcoming
    }
}

/// Normalized program key → campuses that teach it.
///
/// Invariant: every key is non-empty and maps to a non-empty set of known
/// campuses. A key declared twice with different campus sets is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramCampusMap {
    entries: BTreeMap<String, BTreeSet<Campus>>,
    longest_first: Vec<String>,
}

impl ProgramCampusMap {
    /// Build the map from catalog programs (names and aliases).
    pub fn from_programs(programs: &[ProgramEntry]) -> Result<Self, ConfigError> {
        let mut map = Self::default();
        for entry in programs {
            let campuses: BTreeSet<Campus> = entry.campuses.iter().copied().collect();
            for key in std::iter::once(&entry.name).chain(entry.aliases.iter()) {
                map.insert(key, campuses.clone())?;
            }
        }
        Ok(map)
    }

    /// Insert one key, enforcing the map invariants.
    pub fn insert(&mut self, key: &str, campuses: BTreeSet<Campus>) -> Result<(), ConfigError> {
        let normalized = normalize(key);
        if normalized.is_empty() {
            return Err(ConfigError::CatalogError(format!(
                "program key '{key}' is empty after normalization"
            )));
        }
        if campuses.is_empty() {
            return Err(ConfigError::CatalogError(format!(
                "program '{normalized}' has no campus"
            )));
        }
        if campuses.contains(&Campus::Unknown) {
            return Err(ConfigError::CatalogError(format!(
                "program '{normalized}' lists the unknown campus"
            )));
        }

        match self.entries.get(&normalized) {
            Some(existing) if *existing != campuses => {
                return Err(ConfigError::CatalogError(format!(
                    "program '{normalized}' is declared for {} and for {}",
                    describe(existing),
                    describe(&campuses)
                )));
            }
            Some(_) => {
                tracing::debug!(program = %normalized, "Duplicate program key with identical campuses");
                return Ok(());
            }
            None => {}
        }

        self.entries.insert(normalized.clone(), campuses);
        self.longest_first.push(normalized);
        self.longest_first
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Ok(())
    }

    /// Campuses for a normalized key.
    pub fn campuses_for(&self, key: &str) -> Option<&BTreeSet<Campus>> {
        self.entries.get(key)
    }

    /// Keys ordered longest first, so longer names shadow their substrings.
    pub fn keys_longest_first(&self) -> &[String] {
        &self.longest_first
    }
}

fn describe(campuses: &BTreeSet<Campus>) -> String {
    campuses
        .iter()
        .map(Campus::as_str)
        .collect::<Vec<_>>()
        .join("+")
}
