//! Retrieved reference passages and campus tags.

use serde::{Deserialize, Serialize};

/// A physical campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Campus {
    NewYork,
    NewJersey,
    /// Source does not identify a campus.
    Unknown,
}

const NEW_YORK_MARKERS: &[&str] = &["new_york", "new-york", "newyork", "new york"];
const NEW_YORK_TOKENS: &[&str] = &["ny", "nyc", "manhattan", "broadway"];
const NEW_JERSEY_MARKERS: &[&str] = &["new_jersey", "new-jersey", "newjersey", "new jersey"];
const NEW_JERSEY_TOKENS: &[&str] = &["nj", "wayne", "willowbrook"];

impl Campus {
    /// The two real campuses.
    pub const KNOWN: [Campus; 2] = [Campus::NewYork, Campus::NewJersey];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewYork => "new_york",
            Self::NewJersey => "new_jersey",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NewYork => "New York",
            Self::NewJersey => "New Jersey",
            Self::Unknown => "Unknown",
        }
    }

    /// Infer the campus from a path- or URI-shaped source label such as
    /// `gs://bucket/new_york/catalog.txt`. Labels naming both or neither
    /// campus are `Unknown`.
    pub fn from_source_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let matches = |markers: &[&str], token_markers: &[&str]| {
            markers.iter().any(|m| lower.contains(m))
                || tokens.iter().any(|t| token_markers.contains(t))
        };

        match (
            matches(NEW_YORK_MARKERS, NEW_YORK_TOKENS),
            matches(NEW_JERSEY_MARKERS, NEW_JERSEY_TOKENS),
        ) {
            (true, false) => Self::NewYork,
            (false, true) => Self::NewJersey,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Campus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A retrieved text snippet plus its source label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Snippet text.
    pub text: String,

    /// Source URI or display name.
    pub source_label: String,

    /// Campus tag set by the retriever, if it knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<Campus>,
}

impl Passage {
    pub fn new(text: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_label: source_label.into(),
            campus: None,
        }
    }

    pub fn with_campus(mut self, campus: Campus) -> Self {
        self.campus = Some(campus);
        self
    }

    /// Explicit tag, or the campus inferred from the source label.
    pub fn effective_campus(&self) -> Campus {
        self.campus
            .unwrap_or_else(|| Campus::from_source_label(&self.source_label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_from_gcs_labels() {
        assert_eq!(
            Campus::from_source_label("gs://bucket/new_york/catalog.txt"),
            Campus::NewYork
        );
        assert_eq!(
            Campus::from_source_label("gs://bucket/NJ/schedule.pdf"),
            Campus::NewJersey
        );
        assert_eq!(
            Campus::from_source_label("gs://bucket/general/faq.txt"),
            Campus::Unknown
        );
    }

    #[test]
    fn campus_tokens_need_word_boundaries() {
        // "pony" contains "ny" but is not a campus marker
        assert_eq!(Campus::from_source_label("docs/pony-club.txt"), Campus::Unknown);
        assert_eq!(Campus::from_source_label("wayne-campus/hours.md"), Campus::NewJersey);
    }

    #[test]
    fn label_naming_both_campuses_is_unknown() {
        assert_eq!(
            Campus::from_source_label("gs://b/new_york_and_new_jersey/compare.txt"),
            Campus::Unknown
        );
    }

    #[test]
    fn explicit_tag_wins_over_label() {
        let p = Passage::new("text", "gs://bucket/new_york/a.txt").with_campus(Campus::NewJersey);
        assert_eq!(p.effective_campus(), Campus::NewJersey);
    }
}
