// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::sync::Arc;

use async_trait::async_trait;
use time::macros::format_description;
use uuid::Uuid;

use crate::app::errors::{AppError, AppResult};
use crate::app::ports::{ClockPort, DeploymentFactoryPort, EventSinkPort};
use crate::app::services::wasb::WasbUri;
use crate::app::types::{
    ComputeHandle, DeploymentHandle, JobEvent, JobSpecification, MessageKind, StorageBackend,
};

pub const DEFAULT_DEPLOY_ROOT: &str = "SparkSubmission";

/// Plans blob deployments: every job gets its own dated folder below the
/// upload path. Artifact upload itself happens in the job executor.
pub struct BlobDeploymentFactory {
    clock: Arc<dyn ClockPort>,
    deploy_root: String,
}

impl BlobDeploymentFactory {
    pub fn new(clock: Arc<dyn ClockPort>, deploy_root: impl Into<String>) -> Self {
        Self {
            clock,
            deploy_root: deploy_root.into(),
        }
    }

    fn dated_folder(&self) -> AppResult<String> {
        let date = self
            .clock
            .now_utc()
            .format(format_description!("[year]/[month]/[day]"))
            .map_err(|err| AppError::deployment_failure(format!("failed to format date: {err}")))?;
        Ok(format!(
            "{}/{}/{}",
            self.deploy_root.trim_matches('/'),
            date,
            Uuid::new_v4().simple()
        ))
    }
}

#[async_trait]
impl DeploymentFactoryPort for BlobDeploymentFactory {
    #[tracing::instrument(
        name = "deploy",
        level = "debug",
        skip_all,
        fields(compute = %compute.name, state = compute.state.as_str())
    )]
    async fn build_deploy(
        &self,
        spec: &JobSpecification,
        compute: &ComputeHandle,
        events: Arc<dyn EventSinkPort>,
    ) -> AppResult<DeploymentHandle> {
        if !compute.state.is_running() {
            return Err(AppError::deployment_failure(format!(
                "spark compute {} in workspace {} is {}, not running",
                compute.name,
                compute.workspace,
                compute.state.as_str()
            )));
        }
        let upload_path = spec.storage.upload_path.as_deref().unwrap_or_default();
        let root = upload_path.parse::<WasbUri>().map_err(|err| {
            AppError::deployment_failure(format!(
                "upload path {upload_path:?} is not a blob storage root: {err}"
            ))
        })?;
        let destination = root.join(&self.dated_folder()?);
        events.send(JobEvent::new(
            MessageKind::Log,
            format!("Job artifacts will be deployed to {destination}"),
        ));
        Ok(DeploymentHandle {
            backend: StorageBackend::Blob,
            storage_account: root.storage_account().to_string(),
            destination: destination.to_string(),
        })
    }
}
