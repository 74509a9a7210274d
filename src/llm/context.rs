//! Gather candidate context for LLM prompts
//!
//! The translation prompt must list every known candidate name verbatim so
//! the model can copy names instead of inventing them. This module turns a
//! store snapshot into that listing.

use crate::candidates::CandidateRecord;

/// Candidate context for LLM prompts
pub struct CandidateContext {
    /// Candidates the user might reference, in upload order
    pub candidates: Vec<CandidateSummary>,
}

/// The parts of a candidate that help the model disambiguate
pub struct CandidateSummary {
    pub name: String,
    pub job_title: Option<String>,
    pub location: Option<String>,
}

impl CandidateContext {
    /// Build a context from the current store snapshot
    pub fn from_snapshot(records: &[CandidateRecord]) -> Self {
        let candidates = records
            .iter()
            .map(|r| CandidateSummary {
                name: r.name.clone(),
                job_title: r.job_title.clone(),
                location: r.location.clone(),
            })
            .collect();
        Self { candidates }
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Generate the candidate listing for LLM prompts
    ///
    /// One line per candidate. Names are quoted exactly as uploaded.
    pub fn summary(&self) -> String {
        if self.candidates.is_empty() {
            return "Current candidates available: (none uploaded)\n".to_string();
        }

        let mut s = String::from("Current candidates available:\n");
        for candidate in &self.candidates {
            s.push_str(&format!("- \"{}\"", candidate.name));
            let details: Vec<&str> = [&candidate.job_title, &candidate.location]
                .into_iter()
                .filter_map(|d| d.as_deref())
                .collect();
            if !details.is_empty() {
                s.push_str(&format!(" ({})", details.join(", ")));
            }
            s.push('\n');
        }
        s
    }
}
