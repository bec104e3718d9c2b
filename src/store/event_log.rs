//! Append-only log of raw taps, one file per UTC calendar day.
//!
//! Each line is `<RFC 3339 timestamp>,<identifier>`. Lines are never
//! rewritten; the log is the source the attendance tables are derived from.

use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::models::tap::Tap;
use chrono::DateTime;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub struct EventLog {
    dir: PathBuf,
}

impl EventLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Append one tap to its day-file and return the file path.
    pub fn append(&self, tap: &Tap) -> AppResult<PathBuf> {
        let path = self.dir.join(tap.log_file_name());
        let persist_err = |source| AppError::Persist {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(persist_err)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(persist_err)?;

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record([tap.timestamp_str().as_str(), tap.identifier.as_str()])?;
        wtr.flush().map_err(persist_err)?;

        Ok(path)
    }

    /// All day-files, oldest first (file names sort chronologically).
    pub fn day_files(&self) -> AppResult<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "log") {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Parse one day-file. Any malformed line is an error naming file and line.
    pub fn read_file(path: &Path) -> AppResult<Vec<Tap>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut taps = Vec::new();
        for result in rdr.records() {
            let malformed = |line: u64, reason: String| AppError::MalformedLogLine {
                file: path.to_path_buf(),
                line,
                reason,
            };

            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                malformed(line, e.to_string())
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != 2 {
                return Err(malformed(
                    line,
                    format!("expected 2 fields, found {}", record.len()),
                ));
            }

            let timestamp = DateTime::parse_from_rfc3339(&record[0])
                .map_err(|e| malformed(line, format!("bad timestamp '{}': {}", &record[0], e)))?;
            let identifier = Identifier::parse(&record[1])
                .ok_or_else(|| malformed(line, format!("bad identifier '{}'", &record[1])))?;

            taps.push(Tap {
                timestamp,
                identifier,
            });
        }

        Ok(taps)
    }

    /// Every tap ever logged, in replay order.
    pub fn replay(&self) -> AppResult<Vec<Tap>> {
        let mut taps = Vec::new();
        for file in self.day_files()? {
            taps.extend(Self::read_file(&file)?);
        }
        Ok(taps)
    }
}
