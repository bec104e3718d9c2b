//! File-backed state: the raw event log, the user directory and the
//! per-identity attendance tables.

pub mod atomic;
pub mod attendance;
pub mod directory;
pub mod event_log;
