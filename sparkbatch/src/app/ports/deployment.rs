// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::errors::AppResult;
use crate::app::ports::EventSinkPort;
use crate::app::types::{ComputeHandle, DeploymentHandle, JobSpecification};

#[async_trait]
/// Builds the artifact deployment for blob-backed jobs.
/// Errors are returned to the caller untouched, so adapters should use
/// `AppError::deployment_failure` for their own faults.
pub trait DeploymentFactoryPort: Send + Sync {
    async fn build_deploy(
        &self,
        spec: &JobSpecification,
        compute: &ComputeHandle,
        events: Arc<dyn EventSinkPort>,
    ) -> AppResult<DeploymentHandle>;
}
