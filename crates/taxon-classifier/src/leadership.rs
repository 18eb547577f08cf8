//! Leadership override. An explicit grade is authoritative: a leadership
//! grade forces the leadership category, any other grade disables the
//! override entirely. Title indicators are only consulted without a grade.

use std::fmt;

use taxon_core::models::JobPosting;
use taxon_dictionary::LeadershipRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadershipTrigger {
    Grade(String),
    TitleIndicator(String),
}

impl fmt::Display for LeadershipTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grade(grade) => write!(f, "grade '{grade}'"),
            Self::TitleIndicator(indicator) => write!(f, "title indicator '{indicator}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadershipDecision {
    Override { trigger: LeadershipTrigger },
    NotApplicable,
}

pub fn evaluate(job: &JobPosting, rules: &LeadershipRules) -> LeadershipDecision {
    if let Some(grade) = job.explicit_grade() {
        return if rules.is_leadership_grade(grade) {
            LeadershipDecision::Override {
                trigger: LeadershipTrigger::Grade(grade.to_string()),
            }
        } else {
            LeadershipDecision::NotApplicable
        };
    }
    match rules.title_indicator(&job.title) {
        Some(indicator) => LeadershipDecision::Override {
            trigger: LeadershipTrigger::TitleIndicator(indicator.to_string()),
        },
        None => LeadershipDecision::NotApplicable,
    }
}
