//! Telemetry Feed
//!
//! Source of fresh vessel snapshots, one fetch per polling cycle.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::logic::vessel::VesselRecord;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Upstream vessel telemetry
pub trait VesselFeed: Send {
    /// Fresh snapshot of every tracked vessel
    fn fetch(&mut self) -> Result<Vec<VesselRecord>, FeedError>;
}

// ============================================================================
// JSON FILE FEED
// ============================================================================

/// Reads a JSON array of vessel records, re-read on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VesselFeed for JsonFileFeed {
    fn fetch(&mut self) -> Result<Vec<VesselRecord>, FeedError> {
        let content = fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;

        let vessels: Vec<VesselRecord> =
            serde_json::from_str(&content).map_err(|source| FeedError::Parse {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("Loaded {} vessels from {}", vessels.len(), self.path.display());
        Ok(vessels)
    }
}

// ============================================================================
// STATIC FEED
// ============================================================================

/// In-memory snapshot, returned unchanged on every fetch
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    vessels: Vec<VesselRecord>,
}

impl StaticFeed {
    pub fn new(vessels: Vec<VesselRecord>) -> Self {
        Self { vessels }
    }
}

impl VesselFeed for StaticFeed {
    fn fetch(&mut self) -> Result<Vec<VesselRecord>, FeedError> {
        Ok(self.vessels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_file_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": "1", "name": "Ocean Voyager", "type": "Cargo", "status": "active",
                   "location": {{ "lat": 1.3521, "lng": 103.8198 }}, "speed": 12, "course": 45,
                   "lastAisTransmission": "2024-06-01T10:00:00Z" }},
                {{ "id": "2", "location": {{ "lat": 1.3521, "lng": 104.8198 }}, "speed": 0 }}
            ]"#
        )
        .unwrap();

        let mut feed = JsonFileFeed::new(file.path());
        let vessels = feed.fetch().unwrap();
        assert_eq!(vessels.len(), 2);
        assert_eq!(vessels[0].name, "Ocean Voyager");
        assert!(vessels[1].previous_positions.is_empty());
        assert!(vessels[1].last_ais_transmission.is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut feed = JsonFileFeed::new(dir.path().join("nope.json"));
        assert!(matches!(feed.fetch(), Err(FeedError::Io { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let mut feed = JsonFileFeed::new(file.path());
        let err = feed.fetch().unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse feed"));
    }

    #[test]
    fn test_static_feed_repeats() {
        let mut feed = StaticFeed::new(vec![VesselRecord::new("1", 0.0, 0.0, 1.0)]);
        assert_eq!(feed.fetch().unwrap(), feed.fetch().unwrap());
    }
}
