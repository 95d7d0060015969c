use serde::{Deserialize, Serialize};

/// A job posting reduced to the three fields the folder generator needs.
///
/// Fields are trimmed, whitespace-normalized strings; any of them may be
/// empty when the page did not carry that piece of data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub description: String,
}

impl JobRecord {
    /// A record is usable when at least one field carries data. Strategies
    /// that produce an entirely empty record are treated as misses.
    pub fn is_usable(&self) -> bool {
        !self.title.is_empty() || !self.company.is_empty() || !self.description.is_empty()
    }
}
