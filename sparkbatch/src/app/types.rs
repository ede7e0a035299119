// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque credential value. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Storage backend used to stage job artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageBackend {
    Blob,
    DefaultStorageAccount,
    SparkInteractiveSession,
    AdlsGen1,
    AdlsGen2,
    AdlsGen2ForOauth,
    Webhdfs,
    AdlaAccountDefaultStorage,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Blob => "BLOB",
            StorageBackend::DefaultStorageAccount => "DEFAULT_STORAGE_ACCOUNT",
            StorageBackend::SparkInteractiveSession => "SPARK_INTERACTIVE_SESSION",
            StorageBackend::AdlsGen1 => "ADLS_GEN1",
            StorageBackend::AdlsGen2 => "ADLS_GEN2",
            StorageBackend::AdlsGen2ForOauth => "ADLS_GEN2_FOR_OAUTH",
            StorageBackend::Webhdfs => "WEBHDFS",
            StorageBackend::AdlaAccountDefaultStorage => "ADLA_ACCOUNT_DEFAULT_STORAGE",
        }
    }

    #[cfg(test)]
    pub(crate) const ALL: [StorageBackend; 8] = [
        StorageBackend::Blob,
        StorageBackend::DefaultStorageAccount,
        StorageBackend::SparkInteractiveSession,
        StorageBackend::AdlsGen1,
        StorageBackend::AdlsGen2,
        StorageBackend::AdlsGen2ForOauth,
        StorageBackend::Webhdfs,
        StorageBackend::AdlaAccountDefaultStorage,
    ];
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    #[serde(default)]
    pub upload_path: Option<String>,
    #[serde(default)]
    pub credential: Option<Secret>,
}

/// Spark configuration entries (`conf` of a batch request).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfiguration(BTreeMap<String, String>);

impl JobConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, returning the value it replaced.
    pub fn merge_entry(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Livy batch parameters carried by a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionParameters {
    pub file: Option<String>,
    pub class_name: Option<String>,
    pub name: Option<String>,
    pub args: Vec<String>,
    pub jars: Vec<String>,
    pub files: Vec<String>,
    pub py_files: Vec<String>,
    pub driver_memory: Option<String>,
    pub driver_cores: Option<u32>,
    pub executor_memory: Option<String>,
    pub executor_cores: Option<u32>,
    pub num_executors: Option<u32>,
    pub conf: JobConfiguration,
}

/// Everything the user declared for one batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobSpecification {
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    /// Spark pool name inside the workspace.
    #[serde(default)]
    pub compute: Option<String>,
    /// Livy endpoint; the resolved compute's endpoint is used when absent.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub storage: StorageSettings,
    #[serde(default)]
    pub submission: SubmissionParameters,
}

/// Validated addressing triple for a compute lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeQuery {
    pub tenant: String,
    pub workspace: String,
    pub name: String,
}

impl ComputeQuery {
    pub fn matches(&self, compute: &ComputeHandle) -> bool {
        compute.tenant == self.tenant
            && compute.workspace == self.workspace
            && compute.name == self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeState {
    Running,
    Provisioning,
    Stopped,
    Deleting,
    Failed,
}

impl ComputeState {
    pub fn as_str(self) -> &'static str {
        match self {
            ComputeState::Running => "running",
            ComputeState::Provisioning => "provisioning",
            ComputeState::Stopped => "stopped",
            ComputeState::Deleting => "deleting",
            ComputeState::Failed => "failed",
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, ComputeState::Running)
    }
}

/// Reference to one remote Spark pool, as returned by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeHandle {
    pub id: String,
    pub tenant: String,
    pub workspace: String,
    pub name: String,
    /// Livy endpoint of the pool.
    pub endpoint: String,
    pub state: ComputeState,
}

/// Where a job's artifacts will be staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentHandle {
    pub backend: StorageBackend,
    pub storage_account: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionTarget {
    pub tenant: String,
    pub workspace: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Warning,
    Log,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
            MessageKind::Log => "log",
        }
    }
}

/// One progress entry written to an event sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobEvent {
    pub kind: MessageKind,
    pub message: String,
}

impl JobEvent {
    pub fn new(kind: MessageKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(MessageKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(MessageKind::Warning, message)
    }
}
