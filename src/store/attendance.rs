//! One attendance table per identity: `<dir>/<identifier>.csv`.

use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::models::record::AttendanceRecord;
use crate::store::atomic::atomic_write;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::PathBuf;

pub const COLUMNS: [&str; 5] = [
    "date",
    "first_tap_time",
    "last_tap_time",
    "hours",
    "current_streak",
];

pub struct AttendanceStore {
    dir: PathBuf,
}

impl AttendanceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &Identifier) -> PathBuf {
        self.dir.join(format!("{}.csv", id))
    }

    /// Full history of `id`, oldest first. No table yet means no history.
    pub fn load(&self, id: &Identifier) -> AppResult<Vec<AttendanceRecord>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let corrupt = |reason: String| AppError::CorruptStore {
            path: path.clone(),
            reason,
        };

        let mut rdr = ReaderBuilder::new()
            .from_path(&path)
            .map_err(|e| corrupt(e.to_string()))?;

        let headers = rdr.headers().map_err(|e| corrupt(e.to_string()))?;
        if headers.iter().ne(COLUMNS) {
            return Err(corrupt(format!("unexpected header {:?}", headers)));
        }

        let mut history: Vec<AttendanceRecord> = Vec::new();
        for row in rdr.deserialize() {
            let record: AttendanceRecord = row.map_err(|e| corrupt(e.to_string()))?;
            if let Some(prev) = history.last()
                && prev.effective_date >= record.effective_date
            {
                return Err(corrupt(format!(
                    "{} does not follow {}",
                    record.effective_date, prev.effective_date
                )));
            }
            history.push(record);
        }

        Ok(history)
    }

    /// Rewrite the whole table of `id`.
    pub fn save(&self, id: &Identifier, history: &[AttendanceRecord]) -> AppResult<()> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.write_record(COLUMNS)?;
        for record in history {
            wtr.serialize(record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))?;

        atomic_write(&self.path_for(id), &bytes)
    }

    /// Identities that have a table on disk, sorted.
    pub fn identities(&self) -> AppResult<Vec<Identifier>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "csv") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(Identifier::parse)
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Remove every table. Returns how many were deleted.
    pub fn clear(&self) -> AppResult<usize> {
        let ids = self.identities()?;
        for id in &ids {
            fs::remove_file(self.path_for(id))?;
        }
        Ok(ids.len())
    }
}
