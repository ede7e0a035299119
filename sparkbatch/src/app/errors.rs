// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fmt;

pub mod codes {
    pub const CONFIGURATION_INCOMPLETE: &str = "configuration_incomplete";
    pub const INVALID_ENDPOINT: &str = "invalid_endpoint";
    pub const MISSING_UPLOAD_PATH: &str = "missing_upload_path";
    pub const INVALID_UPLOAD_PATH: &str = "invalid_upload_path";
    pub const COMPUTE_NOT_FOUND: &str = "compute_not_found";
    pub const COMPUTE_RESOLUTION_FAILURE: &str = "compute_resolution_failure";
    pub const UNSUPPORTED_STORAGE_BACKEND: &str = "unsupported_storage_backend";
    pub const DEPLOYMENT_FAILURE: &str = "deployment_failure";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const LOCAL_ERROR: &str = "local_error";
}

pub const EXIT_CODE_USAGE: i32 = 2;
pub const EXIT_CODE_OTHER: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorKind {
    ConfigurationIncomplete,
    InvalidEndpoint,
    MissingUploadPath,
    InvalidUploadPath,
    ComputeNotFound,
    ComputeResolution,
    UnsupportedStorageBackend,
    DeploymentFailure,
    Internal,
}

impl AppErrorKind {
    /// True for errors the user fixes by editing the job specification.
    pub fn is_specification_defect(self) -> bool {
        matches!(
            self,
            AppErrorKind::ConfigurationIncomplete
                | AppErrorKind::InvalidEndpoint
                | AppErrorKind::MissingUploadPath
                | AppErrorKind::InvalidUploadPath
                | AppErrorKind::UnsupportedStorageBackend
        )
    }

    pub fn exit_code(self) -> i32 {
        if self.is_specification_defect() {
            EXIT_CODE_USAGE
        } else {
            EXIT_CODE_OTHER
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    kind: AppErrorKind,
    code: &'static str,
    message: String,
    context: Option<String>,
}

impl AppError {
    pub fn with_message(
        kind: AppErrorKind,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn configuration_incomplete(message: impl Into<String>) -> Self {
        Self::with_message(
            AppErrorKind::ConfigurationIncomplete,
            codes::CONFIGURATION_INCOMPLETE,
            message,
        )
    }

    pub fn compute_resolution(message: impl Into<String>) -> Self {
        Self::with_message(
            AppErrorKind::ComputeResolution,
            codes::COMPUTE_RESOLUTION_FAILURE,
            message,
        )
    }

    pub fn deployment_failure(message: impl Into<String>) -> Self {
        Self::with_message(
            AppErrorKind::DeploymentFailure,
            codes::DEPLOYMENT_FAILURE,
            message,
        )
    }

    pub fn local_error(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::Internal, codes::LOCAL_ERROR, message)
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ctx) = &self.context {
            write!(f, "{} ({})", self.message, ctx)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
