use crate::config::Config;
use crate::core::export::ensure_writable;
use crate::errors::AppResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Archive the whole data directory (event log, user directory,
    /// attendance tables and internal log) into a zip file.
    /// Returns the number of files stored.
    pub fn backup(cfg: &Config, dest_file: &str, force: bool) -> AppResult<usize> {
        let src = cfg.data_root();
        let dest = Path::new(dest_file);

        // 1️⃣ Check data dir exists
        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Data directory not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        ensure_writable(dest, force)?;

        // 3️⃣ Collect files, skipping the archive itself if it lives inside
        let dest_abs = fs::canonicalize(dest.parent().unwrap_or(Path::new(".")))
            .ok()
            .and_then(|p| dest.file_name().map(|n| p.join(n)));
        let mut files = Vec::new();
        collect_files(&src, &mut files)?;
        files.retain(|f| fs::canonicalize(f).ok() != dest_abs);
        files.sort();

        // 4️⃣ Write archive
        let file = fs::File::create(dest)?;
        let mut zip = ZipWriter::new(file);
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for path in &files {
            let name = path
                .strip_prefix(&src)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            zip.start_file(name, options)?;
            let mut f = fs::File::open(path)?;
            io::copy(&mut f, &mut zip)?;
        }
        zip.finish()?;

        Ok(files.len())
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}
