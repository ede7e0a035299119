// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::app::ports::EventSinkPort;
use crate::app::services::livy;
use crate::app::types::{
    ComputeHandle, ComputeQuery, DeploymentHandle, JobConfiguration, SubmissionParameters,
    SubmissionTarget,
};

/// A fully assembled batch job, ready for an executor to submit and monitor.
/// Nothing in this crate mutates it after construction.
pub struct SubmittableJob {
    parameters: SubmissionParameters,
    target: SubmissionTarget,
    compute: ComputeHandle,
    deployment: DeploymentHandle,
    events: Arc<dyn EventSinkPort>,
}

impl SubmittableJob {
    pub fn parameters(&self) -> &SubmissionParameters {
        &self.parameters
    }

    pub fn configuration(&self) -> &JobConfiguration {
        &self.parameters.conf
    }

    pub fn target(&self) -> &SubmissionTarget {
        &self.target
    }

    pub fn compute(&self) -> &ComputeHandle {
        &self.compute
    }

    pub fn deployment(&self) -> &DeploymentHandle {
        &self.deployment
    }

    pub fn events(&self) -> &Arc<dyn EventSinkPort> {
        &self.events
    }

    /// Livy batch request body for this job.
    pub fn batch_request(&self) -> Value {
        livy::batch_request(&self.parameters)
    }
}

impl fmt::Debug for SubmittableJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // conf values may hold storage keys
        f.debug_struct("SubmittableJob")
            .field("target", &self.target)
            .field("compute", &self.compute.id)
            .field("deployment", &self.deployment)
            .field("conf_keys", &self.parameters.conf.len())
            .finish_non_exhaustive()
    }
}

/// The explicit endpoint wins; otherwise the job goes to the compute's own Livy endpoint.
pub fn submission_target(
    query: &ComputeQuery,
    endpoint: Option<&str>,
    compute: &ComputeHandle,
) -> SubmissionTarget {
    let endpoint = endpoint
        .map(str::trim)
        .filter(|endpoint| !endpoint.is_empty())
        .unwrap_or(&compute.endpoint);
    SubmissionTarget {
        tenant: query.tenant.clone(),
        workspace: query.workspace.clone(),
        endpoint: endpoint.to_string(),
    }
}

pub fn build_job(
    parameters: SubmissionParameters,
    target: SubmissionTarget,
    compute: ComputeHandle,
    deployment: DeploymentHandle,
    events: Arc<dyn EventSinkPort>,
) -> SubmittableJob {
    SubmittableJob {
        parameters,
        target,
        compute,
        deployment,
        events,
    }
}
