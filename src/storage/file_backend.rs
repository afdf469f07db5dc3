use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::BackendError,
    storage::{
        backend::FormBackend,
        form_model::{FormRecord, FormSubmission, empty_content},
    },
};

/// Forms stored as `forms/{id}.json`, submissions appended one JSON object
/// per line to `submissions/{id}.jsonl`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) a data directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, BackendError> {
        let root = root.as_ref().to_path_buf();
        for dir in [root.join("forms"), root.join("submissions")] {
            fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }
        debug!(root = %root.display(), "file backend opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn form_path(&self, form_id: u64) -> PathBuf {
        self.root.join("forms").join(format!("{}.json", form_id))
    }

    fn submissions_path(&self, form_id: u64) -> PathBuf {
        self.root.join("submissions").join(format!("{}.jsonl", form_id))
    }

    fn write_record(&self, record: &FormRecord) -> Result<(), BackendError> {
        let path = self.form_path(record.id);
        let json = serde_json::to_string_pretty(record).map_err(|e| json_error(&path, e))?;
        fs::write(&path, json).map_err(|e| io_error(&path, e))
    }

    fn read_record(path: &Path) -> Result<FormRecord, BackendError> {
        let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        serde_json::from_str(&raw).map_err(|e| json_error(path, e))
    }

    fn all_records(&self) -> Result<Vec<FormRecord>, BackendError> {
        let dir = self.root.join("forms");
        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                records.push(Self::read_record(&path)?);
            }
        }
        Ok(records)
    }
}

impl FormBackend for FileBackend {
    fn create(&mut self, name: &str, description: &str) -> Result<FormRecord, BackendError> {
        let next_id = self
            .all_records()?
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;

        let record = FormRecord {
            id: next_id,
            name: name.to_string(),
            description: description.to_string(),
            content: empty_content(),
            published: false,
            share_url: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        self.write_record(&record)?;
        info!(form_id = record.id, name, "form created");
        Ok(record)
    }

    fn list(&self) -> Result<Vec<FormRecord>, BackendError> {
        let mut records = self.all_records()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    fn load(&self, form_id: u64) -> Result<FormRecord, BackendError> {
        let path = self.form_path(form_id);
        if !path.exists() {
            return Err(BackendError::FormNotFound(form_id.to_string()));
        }
        Self::read_record(&path)
    }

    fn load_by_share_url(&self, share_url: &str) -> Result<FormRecord, BackendError> {
        self.all_records()?
            .into_iter()
            .find(|r| r.share_url == share_url)
            .ok_or_else(|| BackendError::FormNotFound(share_url.to_string()))
    }

    fn save_content(&mut self, form_id: u64, content: &str) -> Result<(), BackendError> {
        let mut record = self.load(form_id)?;
        if record.published {
            return Err(BackendError::AlreadyPublished(form_id));
        }
        record.content = content.to_string();
        self.write_record(&record)?;
        debug!(form_id, bytes = content.len(), "form content written");
        Ok(())
    }

    fn publish(&mut self, form_id: u64) -> Result<FormRecord, BackendError> {
        let mut record = self.load(form_id)?;
        if record.published {
            return Err(BackendError::AlreadyPublished(form_id));
        }
        record.published = true;
        self.write_record(&record)?;
        Ok(record)
    }

    fn submit(&mut self, share_url: &str, content: &str) -> Result<(), BackendError> {
        let record = self.load_by_share_url(share_url)?;
        if !record.published {
            return Err(BackendError::NotPublished(record.id));
        }

        let submission = FormSubmission {
            form_id: record.id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let path = self.submissions_path(record.id);
        let line = serde_json::to_string(&submission).map_err(|e| json_error(&path, e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;
        writeln!(file, "{}", line).map_err(|e| io_error(&path, e))?;
        Ok(())
    }

    fn submissions(&self, form_id: u64) -> Result<Vec<FormSubmission>, BackendError> {
        self.load(form_id)?;
        let path = self.submissions_path(form_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(|e| json_error(&path, e)))
            .collect()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> BackendError {
    BackendError::Io {
        context: path.display().to_string(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> BackendError {
    BackendError::Json {
        context: path.display().to_string(),
        source,
    }
}
