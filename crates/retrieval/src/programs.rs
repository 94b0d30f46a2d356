//! Which programs a piece of text refers to, and where they are taught.

use std::collections::BTreeSet;

use enrollwise_config::ProgramCampusMap;
use enrollwise_core::{Campus, NormalizedText};
use serde::Serialize;

/// Program keys found in `text`, in longest-first key order.
///
/// A matched key is removed from the text before shorter keys are tried, so
/// "cidesco esthetics" never also reports "esthetics".
pub fn detect_programs(text: &str, programs: &ProgramCampusMap) -> Vec<String> {
    let mut remaining = NormalizedText::new(text);
    programs
        .keys_longest_first()
        .iter()
        .filter(|key| remaining.consume_phrase(key))
        .cloned()
        .collect()
}

/// The programs a request is about and the campuses that may serve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramScope {
    pub programs: Vec<String>,
    /// `None` means every campus is allowed.
    pub allowed: Option<BTreeSet<Campus>>,
}

impl ProgramScope {
    /// Resolve detected program keys to the union of their campus sets.
    pub fn resolve(detected: Vec<String>, programs: &ProgramCampusMap) -> Self {
        if detected.is_empty() {
            return Self::default();
        }
        let allowed = detected
            .iter()
            .filter_map(|key| programs.campuses_for(key))
            .flatten()
            .copied()
            .collect();
        Self {
            programs: detected,
            allowed: Some(allowed),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_none()
    }

    /// Whether a passage tagged `campus` may be shown. Once a program is
    /// known, an unidentified campus is treated as the wrong one.
    pub fn allows(&self, campus: Campus) -> bool {
        match &self.allowed {
            None => true,
            Some(set) => set.contains(&campus),
        }
    }

    /// The single campus the request can be about, if there is exactly one.
    pub fn campus_hint(&self) -> Option<Campus> {
        match &self.allowed {
            Some(set) if set.len() == 1 => set.iter().next().copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrollwise_config::SchoolCatalog;

    fn programs() -> ProgramCampusMap {
        SchoolCatalog::default().program_map().unwrap()
    }

    #[test]
    fn longer_key_shadows_its_substring() {
        let found = detect_programs("Is CIDESCO esthetics offered in Spanish?", &programs());
        assert_eq!(found, vec!["cidesco esthetics".to_string()]);
    }

    #[test]
    fn separate_mentions_are_all_found() {
        let mut found = detect_programs("nails or barbering?", &programs());
        found.sort();
        assert_eq!(found, vec!["barbering".to_string(), "nails".to_string()]);
    }

    #[test]
    fn no_program_means_no_restriction() {
        let scope = ProgramScope::resolve(detect_programs("what are your hours", &programs()), &programs());
        assert!(scope.is_unrestricted());
        assert!(scope.allows(Campus::Unknown));
        assert_eq!(scope.campus_hint(), None);
    }

    #[test]
    fn single_campus_program_gives_hint() {
        let map = programs();
        let scope = ProgramScope::resolve(detect_programs("barbering schedule", &map), &map);
        assert_eq!(scope.campus_hint(), Some(Campus::NewJersey));
        assert!(scope.allows(Campus::NewJersey));
        assert!(!scope.allows(Campus::NewYork));
        assert!(!scope.allows(Campus::Unknown));
    }

    #[test]
    fn union_across_programs() {
        let map = programs();
        let scope = ProgramScope::resolve(detect_programs("waxing and barbering", &map), &map);
        assert!(scope.allows(Campus::NewYork));
        assert!(scope.allows(Campus::NewJersey));
        assert_eq!(scope.campus_hint(), None);
    }
}
