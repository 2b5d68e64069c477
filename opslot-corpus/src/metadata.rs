//! Training metadata loading
//!
//! The training file is JSON: an array of groups, each group an array of
//! event records carrying pre-tokenized summaries and the hour slots the
//! event was worked in.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Hour-of-day operational slot label
pub type HourSlot = u32;

/// A single maintenance event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Originating request identifier, if the exporter kept it
    #[serde(default)]
    pub request_id: Option<String>,

    /// Hour slots this event was tagged with (may repeat across records)
    pub hour_ops: Vec<HourSlot>,

    /// Normalized tokens from the event summary
    pub tokens: Vec<String>,
}

/// Load grouped event records from a JSON metadata file
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<EventRecord>>> {
    let raw = fs::read_to_string(path.as_ref())?;
    let groups: Vec<Vec<EventRecord>> = serde_json::from_str(&raw)?;

    let records: usize = groups.iter().map(|g| g.len()).sum();
    info!(
        "Loaded {} event records in {} groups from {}",
        records,
        groups.len(),
        path.as_ref().display()
    );

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_metadata_roundtrip() {
        let json = r#"[
            [
                {"request_id": "REQ-1", "hour_ops": [9, 10], "tokens": ["pump", "leak"]},
                {"hour_ops": [22], "tokens": ["filter", "swap"]}
            ],
            [
                {"request_id": "REQ-2", "hour_ops": [9], "tokens": ["pump", "inspect"]}
            ]
        ]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let groups = load_metadata(file.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].request_id.as_deref(), Some("REQ-1"));
        assert!(groups[0][1].request_id.is_none());
        assert_eq!(groups[1][0].hour_ops, vec![9]);
    }

    #[test]
    fn test_load_metadata_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json ]").unwrap();
        assert!(load_metadata(file.path()).is_err());
    }

    #[test]
    fn test_load_metadata_missing_file() {
        assert!(load_metadata("/nonexistent/opslot-meta.json").is_err());
    }
}
