// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::errors::{AppError, AppErrorKind, AppResult, codes};
use crate::app::services::wasb::WasbUri;
use crate::app::types::{StorageBackend, StorageSettings};

/// Deployment chosen for a job. Adding a backend means adding a variant here
/// and a credential rule in `credentials`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentStrategy {
    /// Artifacts go to a blob container; needs a resolved compute.
    Blob { root: WasbUri },
}

impl DeploymentStrategy {
    pub fn backend(&self) -> StorageBackend {
        match self {
            DeploymentStrategy::Blob { .. } => StorageBackend::Blob,
        }
    }
}

pub fn require_upload_path(storage: &StorageSettings) -> AppResult<&str> {
    storage
        .upload_path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .ok_or_else(|| {
            AppError::with_message(
                AppErrorKind::MissingUploadPath,
                codes::MISSING_UPLOAD_PATH,
                "no upload path set in the job specification",
            )
        })
}

pub fn select_strategy(storage: &StorageSettings) -> AppResult<DeploymentStrategy> {
    let upload_path = require_upload_path(storage)?;
    match storage.backend {
        StorageBackend::Blob => {
            let root = upload_path.parse::<WasbUri>().map_err(|err| {
                AppError::with_message(
                    AppErrorKind::InvalidUploadPath,
                    codes::INVALID_UPLOAD_PATH,
                    format!("upload path {upload_path:?} is not a blob storage root: {err}"),
                )
            })?;
            Ok(DeploymentStrategy::Blob { root })
        }
        backend @ (StorageBackend::DefaultStorageAccount
        | StorageBackend::SparkInteractiveSession
        | StorageBackend::AdlsGen1
        | StorageBackend::AdlsGen2
        | StorageBackend::AdlsGen2ForOauth
        | StorageBackend::Webhdfs
        | StorageBackend::AdlaAccountDefaultStorage) => Err(AppError::with_message(
            AppErrorKind::UnsupportedStorageBackend,
            codes::UNSUPPORTED_STORAGE_BACKEND,
            format!(
                "storage backend {backend} is not supported for upload; only {} is",
                StorageBackend::Blob
            ),
        )),
    }
}
