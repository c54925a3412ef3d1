use crate::core::path::ensure_parent;
use crate::core::{ModfeedError, ModfeedResult};
use std::fs::{self, File};
use std::io::{Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Entry that could not be read from the source archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: String,
}

/// Outcome of repacking one archive
#[derive(Debug, Clone, Default)]
pub struct RepackReport {
    /// Entry names of the written archive, in order
    pub entries: Vec<String>,
    /// Source entries that failed to read and were left out
    pub skipped: Vec<SkippedEntry>,
    pub required_entry_found: bool,
    /// Text of the required entry, when present and valid UTF-8
    pub required_entry_content: Option<String>,
}

struct SourceEntry {
    name: String,
    is_dir: bool,
    modified: DateTime,
    unix_mode: Option<u32>,
    data: Vec<u8>,
}

impl SourceEntry {
    fn is_symlink(&self) -> bool {
        self.unix_mode
            .map(|mode| mode & S_IFMT == S_IFLNK)
            .unwrap_or(false)
    }
}

/// Re-encode a zip archive with every entry STORED
///
/// Names, directory entries, symlinks, modification times and unix
/// permissions are carried over. Entries that fail to read are skipped with a
/// warning; an archive that cannot be opened at all is an error. The archive
/// is written next to `dest` and only moved over it once it has been reopened
/// and checked for `required_entry`; a missing entry is only a warning.
pub fn repack_archive(data: &[u8], dest: &Path, required_entry: &str) -> ModfeedResult<RepackReport> {
    let mut source = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ModfeedError::Repack(format!("Invalid zip archive: {}", e)))?;

    ensure_parent(dest)?;
    let staging = staging_path(dest);

    let report = match write_stored(&mut source, &staging, required_entry) {
        Ok(report) => report,
        Err(e) => {
            let _ = fs::remove_file(&staging); // Ignore cleanup errors
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&staging, dest) {
        let _ = fs::remove_file(&staging);
        return Err(ModfeedError::Repack(format!(
            "Failed to move repacked archive into {}: {}",
            dest.display(),
            e
        )));
    }

    info!(
        archive = %dest.display(),
        entries = report.entries.len(),
        skipped = report.skipped.len(),
        "repacked archive"
    );
    Ok(report)
}

/// Repack an archive on disk; `input` and `output` may be the same file
pub fn repack_file(input: &Path, output: &Path, required_entry: &str) -> ModfeedResult<RepackReport> {
    let data = fs::read(input)
        .map_err(|e| ModfeedError::Repack(format!("Failed to read {}: {}", input.display(), e)))?;
    repack_archive(&data, output, required_entry)
}

/// Sibling path the archive is written to before replacing `dest`
fn staging_path(dest: &Path) -> PathBuf {
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive.zip".to_string());
    dest.with_file_name(format!(".{}.tmp", file_name))
}

fn write_stored<R: Read + Seek>(
    source: &mut ZipArchive<R>,
    path: &Path,
    required_entry: &str,
) -> ModfeedResult<RepackReport> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let mut skipped = Vec::new();

    for index in 0..source.len() {
        let entry = match read_entry(source, index) {
            Ok(entry) => entry,
            Err(skip) => {
                warn!(entry = %skip.name, reason = %skip.reason, "skipping unreadable archive entry");
                skipped.push(skip);
                continue;
            }
        };
        write_entry(&mut writer, &entry)?;
    }

    writer.finish()?;

    let mut report = verify_archive(path, required_entry)?;
    report.skipped = skipped;
    Ok(report)
}

fn read_entry<R: Read + Seek>(
    source: &mut ZipArchive<R>,
    index: usize,
) -> Result<SourceEntry, SkippedEntry> {
    let mut file = source.by_index(index).map_err(|e| SkippedEntry {
        name: format!("entry #{}", index),
        reason: e.to_string(),
    })?;

    let name = file.name().to_string();
    let is_dir = file.is_dir();
    let modified = file.last_modified();
    let unix_mode = file.unix_mode();

    // The declared size comes from the archive itself, so it is not trusted
    let mut data = Vec::new();
    if let Err(e) = file.read_to_end(&mut data) {
        return Err(SkippedEntry {
            name,
            reason: e.to_string(),
        });
    }

    Ok(SourceEntry {
        name,
        is_dir,
        modified,
        unix_mode,
        data,
    })
}

fn write_entry<W: Write + Seek>(writer: &mut ZipWriter<W>, entry: &SourceEntry) -> ModfeedResult<()> {
    let mut options = FileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(entry.modified)
        .large_file(entry.data.len() as u64 >= u32::MAX as u64);
    if let Some(mode) = entry.unix_mode {
        options = options.unix_permissions(mode);
    }

    if entry.is_dir {
        writer.add_directory(entry.name.as_str(), options)?;
    } else if entry.is_symlink() {
        let target = String::from_utf8_lossy(&entry.data);
        writer.add_symlink(entry.name.as_str(), target.as_ref(), options)?;
    } else {
        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&entry.data)?;
    }
    Ok(())
}

/// Reopen a written archive, list it and look for the required entry
fn verify_archive(path: &Path, required_entry: &str) -> ModfeedResult<RepackReport> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive.by_index(index)?;
        if file.compression() != CompressionMethod::Stored {
            return Err(ModfeedError::Repack(format!(
                "Entry {} in {} is not stored",
                file.name(),
                path.display()
            )));
        }
        debug!(entry = file.name(), "repacked entry");
        entries.push(file.name().to_string());
    }

    let required_entry_found = entries.iter().any(|name| name == required_entry);
    let mut required_entry_content = None;

    if required_entry_found {
        let mut content = String::new();
        match archive.by_name(required_entry) {
            Ok(mut file) => match file.read_to_string(&mut content) {
                Ok(_) => {
                    debug!(entry = required_entry, %content, "required entry content");
                    required_entry_content = Some(content);
                }
                Err(e) => warn!(entry = required_entry, error = %e, "failed to read required entry"),
            },
            Err(e) => warn!(entry = required_entry, error = %e, "failed to open required entry"),
        }
    } else {
        warn!(
            entry = required_entry,
            archive = %path.display(),
            "required entry not found in repacked archive"
        );
    }

    Ok(RepackReport {
        entries,
        skipped: Vec::new(),
        required_entry_found,
        required_entry_content,
    })
}
