//! Content extraction: raw job fields → lowercase [`ContentBundle`].

use taxon_core::models::{normalize_phrase, ContentBundle, JobPosting};

/// Normalize a job's text. Never fails; missing text yields empty fields.
pub fn extract(job: &JobPosting) -> ContentBundle {
    let title = normalize_phrase(&job.title);
    let description = normalize_phrase(&job.description);
    let labels = split_labels(&job.labels);

    let combined = [title.as_str(), description.as_str()]
        .into_iter()
        .chain(labels.iter().map(String::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ContentBundle {
        title,
        description,
        labels,
        combined,
    }
}

/// Split a comma-separated label string, dropping empty segments.
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_phrase)
        .filter(|label| !label.is_empty())
        .collect()
}
