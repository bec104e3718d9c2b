//! Rebuild every attendance table from the raw event log.

use crate::config::Config;
use crate::core::aggregate::apply_tap;
use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::models::record::AttendanceRecord;
use crate::store::attendance::AttendanceStore;
use crate::store::directory::IdentityDirectory;
use crate::store::event_log::EventLog;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryReport {
    pub files: usize,
    pub taps: usize,
    pub identities: usize,
    pub new_identities: usize,
    pub removed_tables: usize,
    /// Taps dated before their card's last day, rejected as in a live session.
    pub skipped: usize,
}

/// Replay the whole event log and rewrite the attendance store from scratch.
///
/// The replay runs in memory first: a malformed log line aborts before any
/// table is touched. A well-formed tap whose day precedes its card's last
/// record is skipped, since the session refused it when it was tapped.
pub fn recover(cfg: &Config) -> AppResult<RecoveryReport> {
    let rules = cfg.day_rules()?;
    let log = EventLog::new(cfg.logs_dir());
    let store = AttendanceStore::new(cfg.attendance_dir());
    let mut directory = IdentityDirectory::load(cfg.users_file())?;

    let files = log.day_files()?.len();
    let mut histories: BTreeMap<Identifier, Vec<AttendanceRecord>> = BTreeMap::new();
    let mut taps = 0;
    let mut new_identities = 0;
    let mut skipped = 0;

    for tap in log.replay()? {
        if directory.insert_default(&tap.identifier) {
            new_identities += 1;
        }
        let history = histories.entry(tap.identifier.clone()).or_default();
        match apply_tap(history, &tap.timestamp, &rules) {
            Ok(_) => {}
            Err(AppError::OutOfOrderTap { .. }) => skipped += 1,
            Err(e) => return Err(e),
        }
        taps += 1;
    }

    if new_identities > 0 {
        directory.save()?;
    }

    let removed_tables = store.clear()?;
    for (id, history) in &histories {
        store.save(id, history)?;
    }

    Ok(RecoveryReport {
        files,
        taps,
        identities: histories.len(),
        new_identities,
        removed_tables,
        skipped,
    })
}
