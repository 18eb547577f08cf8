use serde::{Deserialize, Serialize};

/// A raw job posting as received from the ingestion side.
///
/// Every text field tolerates being empty; `labels` is the comma-separated
/// label string exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub labels: String,
    /// Explicit seniority grade, authoritative when present.
    pub grade: Option<String>,
    /// Organizational affiliation used as a bounded scoring prior.
    pub affiliation: Option<String>,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = labels.into();
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    /// The grade, if one was supplied and is not blank.
    pub fn explicit_grade(&self) -> Option<&str> {
        self.grade
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Canonical lowercase view of a job's text. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBundle {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    /// Title, description, and labels joined by spaces.
    pub combined: String,
}

impl ContentBundle {
    pub fn is_empty(&self) -> bool {
        self.combined.trim().is_empty()
    }
}
