use super::backend::StorageBackend;
use crate::error::{Result, SuperpagesError};
use crate::model::{Page, Snapshot};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};
use uuid::Uuid;

const PAGES_FILE: &str = "pages.json";
const SNAPSHOTS_DIR: &str = "snapshots";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pages_file(&self) -> PathBuf {
        self.root.join(PAGES_FILE)
    }

    fn snapshots_dir(&self) -> PathBuf {
        self.root.join(SNAPSHOTS_DIR)
    }

    fn ledger_file(&self, page_id: &Uuid) -> PathBuf {
        self.snapshots_dir().join(format!("{}.jsonl", page_id))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(SuperpagesError::Io)?;
        }
        Ok(())
    }

    /// Parse a ledger file. Bytes after the last newline are the remains of
    /// an interrupted append and are not a snapshot.
    fn parse_ledger(path: &Path) -> Result<Vec<Snapshot>> {
        let content = fs::read_to_string(path).map_err(SuperpagesError::Io)?;
        let (complete, tail) = match content.rfind('\n') {
            Some(pos) => content.split_at(pos + 1),
            None => ("", content.as_str()),
        };
        if !tail.is_empty() {
            warn!(ledger = %path.display(), bytes = tail.len(), "ignoring torn ledger tail");
        }

        complete
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(SuperpagesError::Serialization))
            .collect()
    }

    /// Cut a torn tail (bytes after the last newline) off the ledger and
    /// return the length of its complete lines.
    fn repair_tail(path: &Path, file: &File) -> Result<u64> {
        let len = file.metadata().map_err(SuperpagesError::Io)?.len();
        if len == 0 {
            return Ok(0);
        }
        let bytes = fs::read(path).map_err(SuperpagesError::Io)?;
        if bytes.last() == Some(&b'\n') {
            return Ok(len);
        }

        let clean = bytes
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |pos| pos as u64 + 1);
        file.set_len(clean).map_err(SuperpagesError::Io)?;
        warn!(ledger = %path.display(), dropped = len - clean, "truncated torn ledger tail");
        Ok(clean)
    }

    /// Map a failed append to an error, first truncating the ledger back to
    /// `len` so no partial or unsynced row survives the failed save.
    fn undo_append(path: &Path, file: &File, len: u64, err: io::Error) -> SuperpagesError {
        match file.set_len(len) {
            Ok(()) => SuperpagesError::Io(err),
            Err(truncate_err) => {
                error!(
                    ledger = %path.display(),
                    error = %truncate_err,
                    "could not truncate ledger after a failed append"
                );
                SuperpagesError::Store(format!(
                    "snapshot append to {} failed ({}) and the ledger could not be truncated back to {} bytes ({})",
                    path.display(),
                    err,
                    len,
                    truncate_err
                ))
            }
        }
    }
}

impl StorageBackend for FsBackend {
    fn load_pages(&self) -> Result<HashMap<Uuid, Page>> {
        let data_file = self.pages_file();
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(SuperpagesError::Io)?;
        let pages: HashMap<Uuid, Page> =
            serde_json::from_str(&content).map_err(SuperpagesError::Serialization)?;
        trace!(count = pages.len(), "loaded page table");
        Ok(pages)
    }

    fn save_pages(&self, pages: &HashMap<Uuid, Page>) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(pages).map_err(SuperpagesError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".pages-{}.tmp", Uuid::new_v4()));
        let written =
            fs::write(&tmp_file, content).and_then(|()| fs::rename(&tmp_file, self.pages_file()));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(SuperpagesError::Io(err));
        }

        debug!(count = pages.len(), root = %self.root.display(), "wrote page table");
        Ok(())
    }

    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let dir = self.snapshots_dir();
        self.ensure_dir(&dir)?;

        let mut line = serde_json::to_string(snapshot).map_err(SuperpagesError::Serialization)?;
        line.push('\n');

        // One line per snapshot, written with a single call. On failure the
        // file is cut back to its previous length.
        let path = self.ledger_file(&snapshot.page_id);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(SuperpagesError::Io)?;
        let len = Self::repair_tail(&path, &file)?;

        if let Err(err) = file
            .write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
        {
            return Err(Self::undo_append(&path, &file, len, err));
        }

        debug!(snapshot = %snapshot.id, page = %snapshot.page_id, "appended snapshot");
        Ok(())
    }

    fn load_snapshots(&self, page_id: &Uuid) -> Result<Vec<Snapshot>> {
        let path = self.ledger_file(page_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::parse_ledger(&path)
    }

    fn count_snapshots(&self) -> Result<usize> {
        let dir = self.snapshots_dir();
        if !dir.exists() {
            return Ok(0);
        }

        // Reads every ledger in full. Only newline bytes are counted, so a
        // torn tail is not a snapshot.
        let mut count = 0;
        for entry in fs::read_dir(&dir).map_err(SuperpagesError::Io)? {
            let path = entry.map_err(SuperpagesError::Io)?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
                let bytes = fs::read(&path).map_err(SuperpagesError::Io)?;
                count += bytes.iter().filter(|b| **b == b'\n').count();
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn my_test_page() -> Page {
        Page::new("My Test Page", "This is a sample flatpage.", "testy_mcpants")
    }

    fn tmp_files(root: &Path) -> Vec<PathBuf> {
        fs::read_dir(root)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("tmp"))
            .collect()
    }

    #[test]
    fn test_failed_rename_removes_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the page table goes makes the rename fail.
        fs::create_dir_all(dir.path().join(PAGES_FILE).join("blocker")).unwrap();

        let backend = FsBackend::new(dir.path().to_path_buf());
        let page = my_test_page();
        let pages = HashMap::from([(page.id, page)]);

        assert!(backend.save_pages(&pages).is_err());
        assert!(tmp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_undo_append_restores_ledger_length() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        let snapshot = Snapshot::of(&my_test_page(), None);
        backend.append_snapshot(&snapshot).unwrap();

        let path = backend.ledger_file(&snapshot.page_id);
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        let len = file.metadata().unwrap().len();
        file.write_all(br#"{"id":"half a row"#).unwrap();

        let err = FsBackend::undo_append(&path, &file, len, io::Error::other("disk full"));
        assert!(matches!(err, SuperpagesError::Io(_)));
        assert_eq!(fs::metadata(&path).unwrap().len(), len);
        assert_eq!(backend.load_snapshots(&snapshot.page_id).unwrap(), vec![snapshot]);
    }

    #[test]
    fn test_append_cuts_torn_tail_first() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        let page = my_test_page();
        let first = Snapshot::of(&page, None);
        backend.append_snapshot(&first).unwrap();

        let path = backend.ledger_file(&page.id);
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(br#"{"id":"0000"#).unwrap();
        drop(file);

        // A torn tail is neither a snapshot nor an error when reading.
        assert_eq!(backend.load_snapshots(&page.id).unwrap().len(), 1);
        assert_eq!(backend.count_snapshots().unwrap(), 1);

        let second = Snapshot::of(&page, Some("Edited"));
        backend.append_snapshot(&second).unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
        assert_eq!(backend.load_snapshots(&page.id).unwrap(), vec![first, second]);
        assert_eq!(backend.count_snapshots().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_complete_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        let page_id = Uuid::new_v4();
        fs::create_dir_all(backend.snapshots_dir()).unwrap();
        fs::write(backend.ledger_file(&page_id), "not json\n").unwrap();

        assert!(matches!(
            backend.load_snapshots(&page_id),
            Err(SuperpagesError::Serialization(_))
        ));
    }
}
