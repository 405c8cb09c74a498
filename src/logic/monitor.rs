//! Monitor Loop
//!
//! One polling cycle: fetch a fresh snapshot, classify it, derive alerts and
//! a summary. Nothing is carried between cycles; the feed owns history.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::thread;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logic::alerts::{collect_alerts, Alert};
use crate::logic::config::MonitorConfig;
use crate::logic::feed::{FeedError, VesselFeed};
use crate::logic::summary::FleetSummary;
use crate::logic::vessel::{process_vessels, process_vessels_parallel, VesselOutcome};

/// Everything produced by one cycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub cycle: u64,
    pub summary: FleetSummary,
    pub alerts: Vec<Alert>,
    pub vessels: Vec<VesselOutcome>,
}

pub struct Monitor {
    feed: Box<dyn VesselFeed>,
    config: MonitorConfig,
    cycles: u64,
}

impl Monitor {
    pub fn new(feed: Box<dyn VesselFeed>, config: MonitorConfig) -> Self {
        Self {
            feed,
            config,
            cycles: 0,
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run a single cycle against the given `now`
    pub fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<CycleReport, FeedError> {
        let vessels = self.feed.fetch()?;
        self.cycles += 1;

        let thresholds = &self.config.thresholds;
        let outcomes = if self.config.parallel {
            process_vessels_parallel(vessels, now, thresholds)
        } else {
            process_vessels(vessels, now, thresholds)
        };

        let alerts = collect_alerts(&outcomes, now);
        let summary = FleetSummary::from_outcomes(&outcomes, &alerts, now);

        log::info!(
            "Cycle {}: {} vessels ({} active, {} alert, {} dark, {} failed), {} alerts",
            self.cycles,
            summary.total_vessels,
            summary.active_vessels,
            summary.alert_vessels,
            summary.dark_vessels,
            summary.failed_vessels,
            summary.alerts
        );

        let report = CycleReport {
            cycle: self.cycles,
            summary,
            alerts,
            vessels: outcomes,
        };

        if let Some(path) = &self.config.report_path {
            if let Err(e) = write_report(path, &report) {
                log::warn!("Failed to write report {}: {}", path.display(), e);
            }
        }

        Ok(report)
    }

    /// Poll until `max_cycles` is reached, or forever.
    ///
    /// Feed errors are logged and the next cycle is attempted as usual.
    pub fn run(&mut self) {
        log::info!(
            "Monitor started: feed={}, interval={}s, parallel={}",
            self.config.feed_path.display(),
            self.config.poll_interval.as_secs(),
            self.config.parallel
        );

        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            if let Err(e) = self.run_cycle(Utc::now()) {
                log::warn!("Cycle {} skipped: {}", attempts, e);
            }

            if self.config.max_cycles.is_some_and(|max| attempts >= max) {
                log::info!("Monitor stopping after {} cycles", attempts);
                break;
            }

            thread::sleep(self.config.poll_interval);
        }
    }
}

fn write_report(path: &Path, report: &CycleReport) -> std::io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
