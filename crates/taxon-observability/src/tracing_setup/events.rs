//! Structured log events with a stable `event` field.

use tracing::{debug, info, warn};

pub fn job_classified(job_id: &str, category: &str, confidence: u8, source: &str) {
    debug!(
        event = "job_classified",
        job_id,
        category,
        confidence,
        source,
        "job classified"
    );
}

pub fn leadership_override(job_id: &str, trigger: &str) {
    info!(event = "leadership_override", job_id, trigger, "leadership override applied");
}

pub fn fallback_used(job_id: &str, reason: &str) {
    warn!(event = "fallback_used", job_id, reason, "classification fell back to default category");
}

pub fn feedback_processed(feedback_id: &str, suggestions: usize, auto_applied: usize) {
    info!(
        event = "feedback_processed",
        feedback_id,
        suggestions,
        auto_applied,
        "feedback processed"
    );
}

pub fn dictionary_updated(category: &str, update: &str, version: u64, auto_applied: bool) {
    info!(
        event = "dictionary_updated",
        category,
        update,
        version,
        auto_applied,
        "dictionary updated"
    );
}

pub fn suggestion_queued(category: &str, update: &str, confidence: f64) {
    debug!(
        event = "suggestion_queued",
        category,
        update,
        confidence,
        "suggestion queued for review"
    );
}

pub fn suggestion_discarded(category: &str, update: &str, confidence: f64) {
    debug!(
        event = "suggestion_discarded",
        category,
        update,
        confidence,
        "suggestion below minimum confidence"
    );
}

pub fn persist_failed(key: &str, error: &str) {
    warn!(event = "persist_failed", key, error, "write failed, will retry");
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    warn!(
        event = "degradation_triggered",
        component,
        failure,
        fallback,
        "component degraded"
    );
}

pub fn degradation_recovered(component: &str) {
    info!(event = "degradation_recovered", component, "component recovered");
}
