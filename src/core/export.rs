//! Export of the derived attendance tables.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::store::attendance::AttendanceStore;
use crate::store::directory::IdentityDirectory;
use crate::ui::messages::{info, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported row: an attendance record with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct RecordExport {
    pub identifier: String,
    pub name: String,
    pub date: String,
    pub first_tap: String,
    pub last_tap: String,
    pub hours: f64,
    pub current_streak: u32,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Collect the rows to export: one identity, or all of them in identifier order.
    pub fn collect(cfg: &Config, only: Option<&Identifier>) -> AppResult<Vec<RecordExport>> {
        let store = AttendanceStore::new(cfg.attendance_dir());
        let directory = IdentityDirectory::load(cfg.users_file())?;

        let ids = match only {
            Some(id) => vec![id.clone()],
            None => store.identities()?,
        };

        let mut rows = Vec::new();
        for id in &ids {
            let name = directory.identity(id).display_name;
            for r in store.load(id)? {
                rows.push(RecordExport {
                    identifier: id.to_string(),
                    name: name.clone(),
                    date: r.effective_date.to_string(),
                    first_tap: r.first_tap.to_rfc3339(),
                    last_tap: r.last_tap.to_rfc3339(),
                    hours: r.hours_present,
                    current_streak: r.current_streak,
                });
            }
        }
        Ok(rows)
    }

    pub fn export(
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        only: Option<&Identifier>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows = Self::collect(cfg, only)?;
        if rows.is_empty() {
            return Err(AppError::Export("no attendance records to export".into()));
        }

        match format {
            ExportFormat::Csv => write_csv(path, &rows)?,
            ExportFormat::Json => write_json(path, &rows)?,
        }

        Ok(rows.len())
    }
}

fn write_csv(path: &Path, rows: &[RecordExport]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json(path: &Path, rows: &[RecordExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json)?;
    Ok(())
}

/// Checks whether a file can be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` is set → Ok
/// - file exists and `force == false` → asks the user for confirmation.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::apply_tap;
    use chrono::DateTime;

    fn seeded() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.use_data_dir(&dir.path().to_string_lossy());

        let rules = cfg.day_rules().unwrap();
        let store = AttendanceStore::new(cfg.attendance_dir());
        for (card, taps) in [
            ("1111111111", vec!["2024-03-01T08:00:00+01:00", "2024-03-01T12:00:00+01:00"]),
            ("2222222222", vec!["2024-03-04T09:00:00+01:00"]),
        ] {
            let mut history = Vec::new();
            for t in taps {
                apply_tap(&mut history, &DateTime::parse_from_rfc3339(t).unwrap(), &rules).unwrap();
            }
            store.save(&Identifier::parse(card).unwrap(), &history).unwrap();
        }
        let mut directory = IdentityDirectory::load(cfg.users_file()).unwrap();
        directory
            .rename(&Identifier::parse("1111111111").unwrap(), "Kari")
            .unwrap();

        (dir, cfg)
    }

    #[test]
    fn collects_all_identities_with_names() {
        let (_dir, cfg) = seeded();
        let rows = ExportLogic::collect(&cfg, None).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Kari");
        assert_eq!(rows[0].hours, 4.0);
        assert_eq!(rows[1].name, "2222222222");
    }

    #[test]
    fn csv_export_of_one_identity() {
        let (dir, cfg) = seeded();
        let out = dir.path().join("out.csv");
        let only = Identifier::parse("2222222222").unwrap();

        let n = ExportLogic::export(
            &cfg,
            ExportFormat::Csv,
            &out.to_string_lossy(),
            Some(&only),
            true,
        )
        .unwrap();

        assert_eq!(n, 1);
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("identifier,name,date,first_tap,last_tap,hours,current_streak"));
        assert!(text.contains("2222222222,2222222222,2024-03-04"));
    }

    #[test]
    fn json_export_is_an_array() {
        let (dir, cfg) = seeded();
        let out = dir.path().join("out.json");

        ExportLogic::export(&cfg, ExportFormat::Json, &out.to_string_lossy(), None, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["name"], "Kari");
    }
}
