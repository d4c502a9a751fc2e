//! File system storage for forum data

use huddle_core::comment::{Comment, NewComment};
use huddle_core::error::{HuddleError, Result};
use huddle_core::post::{NewPost, Post, PostChanges, PostFilter};
use huddle_core::store::{ForumData, ForumStore};
use huddle_core::types::{PostId, SchemaVersion, UserId};
use huddle_core::user::{NewUser, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Schema version written to new data files
pub const CURRENT_SCHEMA_VERSION: SchemaVersion = SchemaVersion::V1_0;

/// Name of the data file inside the base directory
pub const DATA_FILE_NAME: &str = "forum.json";

/// On-disk layout of the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub schema_version: String,
    pub data: ForumData,
    /// Fields written by newer minor versions
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl StoreFile {
    pub fn new(data: ForumData) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            data,
            extra: HashMap::new(),
        }
    }

    /// Reject files from an incompatible major version
    fn check_version(&self) -> Result<()> {
        let version = SchemaVersion::parse(&self.schema_version)
            .ok_or_else(|| HuddleError::UnsupportedSchemaVersion(self.schema_version.clone()))?;
        if !version.is_compatible(&CURRENT_SCHEMA_VERSION) {
            return Err(HuddleError::UnsupportedSchemaVersion(
                self.schema_version.clone(),
            ));
        }
        if version.minor > CURRENT_SCHEMA_VERSION.minor {
            warn!(
                "Data file written by schema {} (this build knows {})",
                version, CURRENT_SCHEMA_VERSION
            );
        }
        Ok(())
    }
}

/// Forum store persisted as a single JSON file.
///
/// Reads are served from memory. Every write is applied to a copy of the
/// tables, flushed to disk through a temp file and rename, and only then
/// swapped in, so a failed write leaves both the file and memory unchanged.
pub struct FileSystemStore {
    /// Base directory for forum data
    base_dir: PathBuf,
    /// Path of the data file
    data_path: PathBuf,
    data: RwLock<ForumData>,
}

impl FileSystemStore {
    /// Open the store in `base_dir`, creating it if needed
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let data_path = base_dir.join(DATA_FILE_NAME);

        ensure_dir(&base_dir)?;
        let data = if data_path.exists() {
            read_data(&data_path)?
        } else {
            debug!("No data file at {:?}, starting empty", data_path);
            ForumData::new()
        };

        Ok(Self {
            base_dir,
            data_path,
            data: RwLock::new(data),
        })
    }

    /// Platform data directory for huddle, falling back to ~/.huddle
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "huddle", "huddle")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".huddle")
            })
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data file path
    pub fn data_path(&self) -> &PathBuf {
        &self.data_path
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self) -> PathBuf {
        self.base_dir.join(format!(".{}.tmp", DATA_FILE_NAME))
    }

    /// Write tables atomically (write to temp, then rename)
    fn atomic_write(&self, data: &ForumData) -> Result<()> {
        let temp_path = self.temp_path();
        let file = StoreFile::new(data.clone());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            HuddleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &self.data_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            HuddleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved forum data to {:?}", self.data_path);
        Ok(())
    }

    /// Apply a change to a copy, persist it, then publish it
    fn mutate<T>(&self, change: impl FnOnce(&mut ForumData) -> Result<T>) -> Result<T> {
        let mut guard = self.write()?;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.atomic_write(&next)?;
        *guard = next;
        Ok(out)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ForumData>> {
        self.data
            .read()
            .map_err(|_| HuddleError::Store("file store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ForumData>> {
        self.data
            .write()
            .map_err(|_| HuddleError::Store("file store lock poisoned".to_string()))
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            HuddleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;
        debug!("Created data directory: {:?}", dir);
    }
    Ok(())
}

fn read_data(path: &Path) -> Result<ForumData> {
    let file = fs::File::open(path)?;
    let store_file: StoreFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| HuddleError::from(e).with_context(format!("reading {}", path.display())))?;
    store_file.check_version()?;

    info!(
        "Loaded forum data from {:?} (schema {})",
        path, store_file.schema_version
    );
    Ok(store_file.data)
}

impl ForumStore for FileSystemStore {
    fn user(&self, id: UserId) -> Result<User> {
        self.read()?.user(id).cloned()
    }

    fn find_user(&self, login: &str) -> Result<Option<User>> {
        Ok(self.read()?.find_user(login).cloned())
    }

    fn users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users().to_vec())
    }

    fn insert_user(&self, user: NewUser) -> Result<User> {
        self.mutate(|data| data.insert_user(user))
    }

    fn post(&self, id: PostId) -> Result<Post> {
        self.read()?.post(id).cloned()
    }

    fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        Ok(self.read()?.posts(filter))
    }

    fn count_posts(&self, filter: &PostFilter) -> Result<usize> {
        Ok(self.read()?.count_posts(filter))
    }

    fn insert_post(&self, post: NewPost) -> Result<Post> {
        self.mutate(|data| data.insert_post(post))
    }

    fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post> {
        self.mutate(|data| data.update_post(id, changes))
    }

    fn delete_post(&self, id: PostId) -> Result<usize> {
        self.mutate(|data| data.delete_post(id))
    }

    fn comments_for(&self, post_id: PostId) -> Result<Vec<Comment>> {
        Ok(self.read()?.comments_for(post_id))
    }

    fn comment_count(&self, post_id: PostId) -> Result<usize> {
        Ok(self.read()?.comment_count(post_id))
    }

    fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        self.mutate(|data| data.insert_comment(comment))
    }
}
