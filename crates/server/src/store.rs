//! Uploaded game files: kept on disk, indexed in memory.

use std::{
    io,
    path::{Path, PathBuf},
};

use chess_core::Color;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{fs, sync::RwLock};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: Uuid,
    pub path: PathBuf,
    pub player_color: Color,
    pub uploaded_at: DateTime<Utc>,
    pub size_bytes: usize,
}

/// Public view of an upload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UploadSummary {
    pub id: Uuid,
    pub player_color: &'static str,
    pub uploaded_at: DateTime<Utc>,
    pub size_bytes: usize,
}

impl From<&UploadedFile> for UploadSummary {
    fn from(upload: &UploadedFile) -> Self {
        Self {
            id: upload.id,
            player_color: upload.player_color.name(),
            uploaded_at: upload.uploaded_at,
            size_bytes: upload.size_bytes,
        }
    }
}

pub struct UploadStore {
    dir: PathBuf,
    uploads: RwLock<Vec<UploadedFile>>,
}

impl UploadStore {
    /// Creates `dir` if needed. Files already in it are not indexed.
    pub async fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir).await?;
        Ok(Self {
            dir: dir.to_path_buf(),
            uploads: RwLock::new(Vec::new()),
        })
    }

    pub async fn save(&self, pgn: &str, player_color: Color) -> io::Result<UploadedFile> {
        let id = Uuid::new_v4();
        let path = self.dir.join(format!("{id}.pgn"));
        fs::write(&path, pgn).await?;

        let upload = UploadedFile {
            id,
            path,
            player_color,
            uploaded_at: Utc::now(),
            size_bytes: pgn.len(),
        };
        self.uploads.write().await.push(upload.clone());
        tracing::info!(upload_id = %id, color = player_color.name(), bytes = pgn.len(), "stored upload");
        Ok(upload)
    }

    pub async fn get(&self, id: Uuid) -> Option<UploadedFile> {
        self.uploads.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Most recently stored upload.
    pub async fn latest(&self) -> Option<UploadedFile> {
        self.uploads.read().await.last().cloned()
    }

    pub async fn count(&self) -> usize {
        self.uploads.read().await.len()
    }

    pub async fn read_pgn(&self, upload: &UploadedFile) -> io::Result<String> {
        fs::read_to_string(&upload.path).await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
