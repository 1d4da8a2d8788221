//! Save into a directory: write `<name>.part`, fsync, then atomic rename.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{validate_filename, FileDownloader, SavedFile};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `data.txt` → `data.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Saves artifacts under a fixed directory, replacing any previous file of the same name.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final path for `filename` inside the directory.
    pub fn final_path(&self, filename: &str) -> io::Result<PathBuf> {
        Ok(self.dir.join(validate_filename(filename)?))
    }
}

impl FileDownloader for DirectoryDownloader {
    fn save(&self, content: &[u8], filename: &str, mime: &str) -> io::Result<SavedFile> {
        fs::create_dir_all(&self.dir)?;
        let final_path = self.final_path(filename)?;
        let tmp = temp_path(&final_path);

        if let Err(e) = write_synced(&tmp, content) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &final_path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        tracing::debug!(
            path = %final_path.display(),
            mime,
            bytes = content.len(),
            "artifact saved"
        );
        Ok(SavedFile {
            destination: Some(final_path),
            bytes: content.len() as u64,
        })
    }
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("data.txt"));
        assert_eq!(p.to_string_lossy(), "data.txt.part");
        let p2 = temp_path(Path::new("/tmp/out/data.txt"));
        assert_eq!(p2.to_string_lossy(), "/tmp/out/data.txt.part");
    }

    #[test]
    fn save_writes_final_file_and_no_part() {
        let dir = tempfile::tempdir().unwrap();
        let d = DirectoryDownloader::new(dir.path());
        let saved = d.save(b"{\n  \"a\": 1\n}", "data.txt", "text/plain").unwrap();

        let final_path = dir.path().join("data.txt");
        assert_eq!(saved.destination.as_deref(), Some(final_path.as_path()));
        assert_eq!(saved.bytes, 12);
        assert_eq!(fs::read(&final_path).unwrap(), b"{\n  \"a\": 1\n}");
        assert!(!temp_path(&final_path).exists());
    }

    #[test]
    fn save_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let d = DirectoryDownloader::new(dir.path());
        d.save(b"old content that is longer", "data.txt", "text/plain")
            .unwrap();
        d.save(b"new", "data.txt", "text/plain").unwrap();
        assert_eq!(fs::read(dir.path().join("data.txt")).unwrap(), b"new");
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let d = DirectoryDownloader::new(&nested);
        d.save(b"x", "data.txt", "text/plain").unwrap();
        assert!(nested.join("data.txt").exists());
    }

    #[test]
    fn save_refuses_names_leaving_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("out");
        let d = DirectoryDownloader::new(&dir);
        let err = d.save(b"x", "../escape.txt", "text/plain").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!root.path().join("escape.txt").exists());
        assert!(!root.path().join("escape.txt.part").exists());
    }

    #[test]
    fn save_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let d = DirectoryDownloader::new(dir.path());
        let err = d.save(b"x", "..", "text/plain").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
