//! Local file lifecycle.
//!
//! Bodies stream into a `.part` temp file and are renamed into place only
//! after the transfer completes, so an interrupted run never touches an
//! existing file and a half-written download is always distinguishable.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suffix of in-progress downloads.
pub const PART_SUFFIX: &str = ".part";

/// What to do when the destination filename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Save under `name (n).ext` with the smallest free `n`.
    #[default]
    Rename,
    Overwrite,
    /// Leave the existing file alone and report the URL as done.
    Skip,
}

/// `file.zip` → `file.zip.part`.
pub fn part_path(final_path: &Path) -> PathBuf {
    let mut os = final_path.as_os_str().to_owned();
    os.push(PART_SUFFIX);
    PathBuf::from(os)
}

/// Resolves `filename` inside `dir` per the policy. `None` means skip.
pub fn resolve_collision(dir: &Path, filename: &str, policy: CollisionPolicy) -> Option<PathBuf> {
    let direct = dir.join(filename);
    if !direct.exists() {
        return Some(direct);
    }
    match policy {
        CollisionPolicy::Overwrite => Some(direct),
        CollisionPolicy::Skip => None,
        CollisionPolicy::Rename => {
            for n in 1u32.. {
                let candidate = dir.join(numbered(filename, n));
                if !candidate.exists() {
                    return Some(candidate);
                }
            }
            unreachable!()
        }
    }
}

/// `report.pdf` + 2 → `report (2).pdf`; extensionless names get the suffix
/// at the end.
fn numbered(filename: &str, n: u32) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{filename} ({n})"),
    }
}

/// Sequential writer for an in-progress download. The handle closes on every
/// exit path; the temp file itself stays behind unless `finalize` runs.
#[derive(Debug)]
pub struct PartFile {
    file: File,
    path: PathBuf,
}

impl PartFile {
    /// Creates (or truncates) the temp file.
    pub fn create(path: PathBuf) -> std::io::Result<PartFile> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        Ok(PartFile { file, path })
    }

    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes to disk and renames the temp file onto `final_path`.
    pub fn finalize(self, final_path: &Path) -> std::io::Result<()> {
        self.file.sync_all()?;
        drop(self.file);
        std::fs::rename(&self.path, final_path)
    }

    /// Deliberate removal (late skip); failures are not interesting.
    pub fn discard(self) {
        drop(self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
