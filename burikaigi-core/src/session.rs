//! The normalized conference session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One agenda item, normalized across both site layouts.
///
/// `title` is never empty (extractors fall back to the speaker label) and
/// `end >= start` always holds (a missing end defaults to start + 10 min).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub title: String,
    /// Presenter name, optionally suffixed with an affiliation in
    /// parentheses. Empty for non-talk items (opening, closing, teardown).
    pub speaker: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

impl Session {
    /// Stable calendar UID, derived from the field values alone so that
    /// re-running the scrape against unchanged HTML yields identical UIDs.
    pub fn uid(&self) -> String {
        let mut hasher = Sha256::new();
        for field in [
            &self.title,
            &self.speaker,
            &self.description,
            &self.location,
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(self.start.timestamp().to_be_bytes());
        hasher.update(self.end.timestamp().to_be_bytes());

        // 16 digest bytes keep the UID line under the 75-octet fold limit
        let digest = hasher.finalize();
        let hex: String = digest[..16].iter().map(|b| format!("{:02x}", b)).collect();
        format!("{}@burikaigi", hex)
    }
}
