use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipped. Returns the final
    /// path, or `None` when the user declined to overwrite.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if target.exists() && !force && !confirm_overwrite(&target)? {
            info("Backup cancelled.");
            return Ok(None);
        }

        if compress {
            compress_into(src, &target)?;
        } else {
            fs::copy(src, &target)?;
        }

        success(format!("Backup created: {}", target.display()));

        ttlog_quiet(
            &pool.conn,
            "backup",
            &target.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(target))
    }
}

fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));
    Ok(confirm("Overwrite?")?)
}

/// Write `src` as the single entry of a deflated zip at `zip_path`.
fn compress_into(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());

    zip.start_file(entry, options).map_err(io::Error::other)?;

    let mut f = fs::File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    Ok(())
}
