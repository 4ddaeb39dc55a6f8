//! Label tallies over a session.

use serde::Serialize;

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// How the session's items are labelled right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSummary {
    pub total: usize,
    /// Items whose final label is set.
    pub overridden: usize,
    /// Items whose final label differs from the suggestion.
    pub disagreements: usize,
    /// Effective labels in first-seen order.
    pub by_label: Vec<LabelCount>,
}

/// Tally effective labels (final label if set, else the suggestion).
#[must_use]
pub fn summarize(session: &Session) -> LabelSummary {
    let mut by_label: Vec<LabelCount> = Vec::new();
    let mut overridden = 0;
    let mut disagreements = 0;

    for item in session.items() {
        if !item.final_label().is_empty() {
            overridden += 1;
            if item.final_label() != item.suggested_label() {
                disagreements += 1;
            }
        }
        let label = item.effective_label();
        match by_label.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => by_label.push(LabelCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    LabelSummary {
        total: session.len(),
        overridden,
        disagreements,
        by_label,
    }
}
