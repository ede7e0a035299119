// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fmt;
use std::str::FromStr;

use thiserror::Error as ThisError;

const BLOB_HOST_MARKER: &str = ".blob.";

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ParseWasbUriError {
    #[error("missing scheme; expected wasb://, wasbs://, http:// or https://")]
    MissingScheme,
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("missing blob container")]
    MissingContainer,
    #[error("`{0}` is not an Azure blob endpoint")]
    NotBlobHost(String),
}

/// Blob filesystem root, e.g. `wasbs://container@account.blob.core.windows.net/some/dir`.
///
/// The `https://account.blob.<suffix>/container/dir` form is accepted too and
/// normalized to `wasbs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasbUri {
    secure: bool,
    container: String,
    storage_account: String,
    endpoint_suffix: String,
    path: String,
}

impl WasbUri {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn storage_account(&self) -> &str {
        &self.storage_account
    }

    /// Cloud suffix after `.blob.`, e.g. `core.windows.net`.
    pub fn endpoint_suffix(&self) -> &str {
        &self.endpoint_suffix
    }

    /// Path below the container, without leading or trailing slashes.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn blob_host(&self) -> String {
        format!("{}.blob.{}", self.storage_account, self.endpoint_suffix)
    }

    /// Appends slash-separated segments to the path. Empty segments are skipped.
    pub fn join(&self, relative: &str) -> WasbUri {
        let segments = self
            .path
            .split('/')
            .chain(relative.split('/'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        WasbUri {
            path: segments.join("/"),
            ..self.clone()
        }
    }
}

impl fmt::Display for WasbUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "wasbs" } else { "wasb" };
        write!(
            f,
            "{scheme}://{}@{}/",
            self.container,
            self.blob_host()
        )?;
        if !self.path.is_empty() {
            write!(f, "{}/", self.path)?;
        }
        Ok(())
    }
}

impl FromStr for WasbUri {
    type Err = ParseWasbUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s
            .trim()
            .split_once("://")
            .ok_or(ParseWasbUriError::MissingScheme)?;
        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, path),
            None => (rest, ""),
        };

        let (secure, container, host, path) = match scheme.to_ascii_lowercase().as_str() {
            "wasb" | "wasbs" => {
                let (container, host) = authority
                    .split_once('@')
                    .ok_or(ParseWasbUriError::MissingContainer)?;
                (scheme.eq_ignore_ascii_case("wasbs"), container, host, path)
            }
            "http" | "https" => {
                let (container, path) = match path.split_once('/') {
                    Some((container, path)) => (container, path),
                    None => (path, ""),
                };
                (true, container, authority, path)
            }
            other => return Err(ParseWasbUriError::UnsupportedScheme(other.to_string())),
        };

        if container.is_empty() || container.contains('.') {
            return Err(ParseWasbUriError::MissingContainer);
        }
        let host_without_port = host.split(':').next().unwrap_or_default();
        let (storage_account, endpoint_suffix) = host_without_port
            .split_once(BLOB_HOST_MARKER)
            .filter(|(account, suffix)| {
                !account.is_empty() && !account.contains('.') && !suffix.is_empty()
            })
            .ok_or_else(|| ParseWasbUriError::NotBlobHost(host.to_string()))?;

        Ok(WasbUri {
            secure,
            container: container.to_string(),
            storage_account: storage_account.to_ascii_lowercase(),
            endpoint_suffix: endpoint_suffix.to_ascii_lowercase(),
            path: path.trim_matches('/').to_string(),
        })
    }
}
