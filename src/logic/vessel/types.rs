//! Vessel Types
//!
//! Core types for vessel status classification.
//! No decision logic here - data structures and wire shape only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// VESSEL STATUS
// ============================================================================

/// Surveillance status written back to a vessel record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VesselStatus {
    /// Transmitting normally, no evidence found
    #[default]
    Active,
    /// Signal present but movement inconsistent
    Alert,
    /// Signal lost or flagged
    Dark,
}

impl VesselStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VesselStatus::Active => "active",
            VesselStatus::Alert => "alert",
            VesselStatus::Dark => "dark",
        }
    }

    /// True for `alert` and `dark`
    pub fn is_flagged(&self) -> bool {
        !matches!(self, VesselStatus::Active)
    }
}

impl std::fmt::Display for VesselStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TIMESTAMP
// ============================================================================

/// A feed timestamp.
///
/// Keeps the text exactly as received next to its parsed instant. Text that
/// does not parse still deserializes; `instant()` is then `None` and every
/// check treats the field as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: parse_instant(raw),
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339(),
            parsed: Some(instant),
        }
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        let parsed = parse_instant(&raw);
        Self { raw, parsed }
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

/// RFC 3339, then naive date-time (UTC), then bare date (midnight UTC)
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// POSITION DATA
// ============================================================================

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One historical fix from the telemetry feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: Timestamp,
    /// Speed over ground (knots)
    pub speed: f64,
}

impl PositionSample {
    pub fn new(lat: f64, lng: f64, timestamp: impl Into<Timestamp>, speed: f64) -> Self {
        Self {
            lat,
            lng,
            timestamp: timestamp.into(),
            speed,
        }
    }

    /// Parsed instant, only when coordinates and speed are finite as well
    pub fn usable_instant(&self) -> Option<DateTime<Utc>> {
        if self.lat.is_finite() && self.lng.is_finite() && self.speed.is_finite() {
            self.timestamp.instant()
        } else {
            None
        }
    }
}

// ============================================================================
// VESSEL RECORD
// ============================================================================

/// Current snapshot of one vessel as delivered by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: VesselStatus,
    pub location: Location,
    /// Speed over ground (knots)
    pub speed: f64,
    /// Course over ground (degrees)
    #[serde(default)]
    pub course: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// `None` = unknown, distinct from an explicit `false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ais_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ais_transmission: Option<Timestamp>,
    /// Recent fixes, in no guaranteed order
    #[serde(default)]
    pub previous_positions: Vec<PositionSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<bool>,
}

impl VesselRecord {
    pub fn new(id: &str, lat: f64, lng: f64, speed: f64) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            kind: String::new(),
            status: VesselStatus::Active,
            location: Location::new(lat, lng),
            speed,
            course: 0.0,
            confidence: None,
            ais_match: None,
            timestamp: None,
            last_ais_transmission: None,
            previous_positions: vec![],
            suspicious: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_status(mut self, status: VesselStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_ais_match(mut self, ais_match: Option<bool>) -> Self {
        self.ais_match = ais_match;
        self
    }

    pub fn with_last_transmission(mut self, ts: impl Into<Timestamp>) -> Self {
        self.last_ais_transmission = Some(ts.into());
        self
    }

    pub fn with_history(mut self, history: Vec<PositionSample>) -> Self {
        self.previous_positions = history;
        self
    }
}

// ============================================================================
// FINDINGS
// ============================================================================

/// One piece of evidence produced by a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// AIS silent longer than the gap threshold
    SignalGap { hours: f64 },
    /// Speed reported as zero while the fixes move
    ZeroSpeedMovement,
    /// Speed spread or implied speed out of line
    ErraticMovement,
    /// Explicit AIS mismatch for a vessel seen recently
    NoAisMatch,
}

impl Finding {
    /// Human-readable evidence line
    pub fn reason(&self) -> String {
        match self {
            Finding::SignalGap { hours } => {
                format!("AIS silent for {} hours", hours.round() as i64)
            }
            Finding::ZeroSpeedMovement => "Speed reported as 0 but position changing".to_string(),
            Finding::ErraticMovement => "Erratic movement pattern detected".to_string(),
            Finding::NoAisMatch => "No AIS match for previously active vessel".to_string(),
        }
    }

    /// Signal-loss evidence, as opposed to movement inconsistency
    pub fn is_dark_evidence(&self) -> bool {
        matches!(self, Finding::SignalGap { .. } | Finding::NoAisMatch)
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Result of classifying one vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Dark OR suspicious evidence found
    pub is_dark: bool,
    /// Movement-inconsistency evidence found
    pub is_suspicious: bool,
    /// Evidence trail, in detection order
    #[serde(rename = "reason")]
    pub reasons: Vec<String>,
    /// Absent when no usable transmission timestamp was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_since_last_transmission: Option<f64>,
    pub findings: Vec<Finding>,
}

impl ClassificationResult {
    /// Any signal-loss finding fired
    pub fn has_dark_evidence(&self) -> bool {
        self.findings.iter().any(Finding::is_dark_evidence)
    }

    /// No check fired
    pub fn is_clear(&self) -> bool {
        self.findings.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
