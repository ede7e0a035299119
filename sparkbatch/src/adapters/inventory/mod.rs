// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::app::errors::{AppError, AppResult};
use crate::app::ports::{ComputeInventoryPort, ComputeStream};
use crate::app::types::{ComputeHandle, ComputeQuery};

const MATCH_CHANNEL_CAPACITY: usize = 8;

#[derive(Debug, Default, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    computes: Vec<ComputeHandle>,
}

/// Compute inventory backed by a TOML file with `[[computes]]` entries.
/// The file is re-read on every lookup.
#[derive(Clone, Debug)]
pub struct FileInventory {
    path: PathBuf,
}

impl FileInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[tracing::instrument(name = "inventory", level = "debug", skip(path), fields(path = %path.display()))]
async fn read_inventory(path: &Path) -> AppResult<Vec<ComputeHandle>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("inventory file missing; treating as empty");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(AppError::local_error(format!(
                "failed to read compute inventory {}: {err}",
                path.display()
            )));
        }
    };
    let parsed: InventoryFile = toml::from_str(&contents).map_err(|err| {
        AppError::local_error(format!(
            "failed to parse compute inventory {}: {err}",
            path.display()
        ))
    })?;
    Ok(parsed.computes)
}

#[async_trait]
impl ComputeInventoryPort for FileInventory {
    fn find_computes(&self, query: &ComputeQuery) -> ComputeStream {
        let (tx, rx) = mpsc::channel(MATCH_CHANNEL_CAPACITY);
        let path = self.path.clone();
        let query = query.clone();
        tokio::spawn(async move {
            match read_inventory(&path).await {
                Ok(computes) => {
                    for compute in computes.into_iter().filter(|c| query.matches(c)) {
                        // receiver gone: the caller already has what it needs
                        if tx.send(Ok(compute)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                }
            }
        });
        Box::pin(ReceiverStream::new(rx))
    }

    async fn list_computes(&self) -> AppResult<Vec<ComputeHandle>> {
        read_inventory(&self.path).await
    }
}
