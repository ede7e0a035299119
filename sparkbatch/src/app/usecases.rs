// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::sync::Arc;

use crate::app::errors::{AppError, AppErrorKind, AppResult, codes};
use crate::app::ports::{
    ComputeInventoryPort, DeploymentFactoryPort, EventSinkPort, SecretProviderPort,
    TelemetryEvent, TelemetryPort,
};
use crate::app::services::credentials::{self, STORAGE_KEY_SECRET_SERVICE};
use crate::app::services::strategy::{self, DeploymentStrategy};
use crate::app::services::wasb::WasbUri;
use crate::app::services::{job_builder, resolver, validation};
use crate::app::types::{ComputeHandle, JobEvent, JobSpecification, StorageBackend};

pub use crate::app::services::job_builder::SubmittableJob;

/// Progress of one `build_submittable_job` run; recorded on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Unvalidated,
    Validated,
    ResourceResolved,
    StrategySelected,
    CredentialInjected,
    Built,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Unvalidated => "unvalidated",
            PipelineStage::Validated => "validated",
            PipelineStage::ResourceResolved => "resource_resolved",
            PipelineStage::StrategySelected => "strategy_selected",
            PipelineStage::CredentialInjected => "credential_injected",
            PipelineStage::Built => "built",
        }
    }
}

#[derive(Clone)]
pub struct UseCases {
    pub(crate) inventory: Arc<dyn ComputeInventoryPort>,
    pub(crate) deployments: Arc<dyn DeploymentFactoryPort>,
    pub(crate) secrets: Arc<dyn SecretProviderPort>,
    pub(crate) telemetry: Arc<dyn TelemetryPort>,
}

impl UseCases {
    pub fn new(
        inventory: Arc<dyn ComputeInventoryPort>,
        deployments: Arc<dyn DeploymentFactoryPort>,
        secrets: Arc<dyn SecretProviderPort>,
        telemetry: Arc<dyn TelemetryPort>,
    ) -> Self {
        Self {
            inventory,
            deployments,
            secrets,
            telemetry,
        }
    }

    /// Turns a job specification into a submittable job.
    ///
    /// Stages run in order and the first failure ends the run: addressing
    /// validation, upload path and backend selection, compute lookup,
    /// deployment, storage key injection, assembly. Nothing is persisted and
    /// a failed run exposes no partial job.
    #[tracing::instrument(
        name = "job_build",
        skip_all,
        fields(
            tenant = spec.tenant.as_deref(),
            workspace = spec.workspace.as_deref(),
            compute = spec.compute.as_deref(),
            backend = spec.storage.backend.as_str(),
        )
    )]
    pub async fn build_submittable_job(
        &self,
        spec: JobSpecification,
        events: Arc<dyn EventSinkPort>,
    ) -> AppResult<SubmittableJob> {
        let telemetry_base = TelemetryEvent {
            tenant: spec.tenant.clone(),
            workspace: spec.workspace.clone(),
            compute: spec.compute.clone(),
            backend: Some(spec.storage.backend.as_str()),
            ..TelemetryEvent::default()
        };
        self.telemetry
            .event("job.build.started", telemetry_base.clone());

        let mut stage = PipelineStage::Unvalidated;
        let result = self.run_pipeline(spec, events, &mut stage).await;
        match &result {
            Ok(job) => {
                tracing::info!(
                    compute_id = %job.compute().id,
                    destination = %job.deployment().destination,
                    "job assembled"
                );
                self.telemetry.event(
                    "job.build.completed",
                    TelemetryEvent {
                        stage: Some(stage.as_str()),
                        ..telemetry_base
                    },
                );
            }
            Err(err) => {
                tracing::warn!(
                    stage = stage.as_str(),
                    code = err.code(),
                    "job rejected: {err}"
                );
                self.telemetry.event(
                    "job.build.failed",
                    TelemetryEvent {
                        stage: Some(stage.as_str()),
                        error_code: Some(err.code()),
                        ..telemetry_base
                    },
                );
            }
        }
        result
    }

    /// Same as `build_submittable_job`, driven to completion on the calling thread.
    /// Fails with a local error when the calling thread already runs a Tokio
    /// runtime; async callers use `build_submittable_job`.
    pub fn build_submittable_job_blocking(
        &self,
        spec: JobSpecification,
        events: Arc<dyn EventSinkPort>,
    ) -> AppResult<SubmittableJob> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(AppError::local_error(
                "blocking job build called from inside an async runtime; await build_submittable_job instead",
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                AppError::with_message(
                    AppErrorKind::Internal,
                    codes::INTERNAL_ERROR,
                    format!("failed to start runtime: {err}"),
                )
            })?;
        runtime.block_on(self.build_submittable_job(spec, events))
    }

    async fn run_pipeline(
        &self,
        spec: JobSpecification,
        events: Arc<dyn EventSinkPort>,
        stage: &mut PipelineStage,
    ) -> AppResult<SubmittableJob> {
        let query = validation::validate(&spec)?;
        *stage = PipelineStage::Validated;

        let selected = strategy::select_strategy(&spec.storage)?;
        let (compute, deployment, root) = match selected {
            DeploymentStrategy::Blob { root } => {
                let compute = resolver::resolve_compute(self.inventory.as_ref(), &query).await?;
                *stage = PipelineStage::ResourceResolved;
                events.send(JobEvent::info(format!(
                    "Found spark compute {} in workspace {}",
                    compute.name, compute.workspace
                )));
                let deployment = self
                    .deployments
                    .build_deploy(&spec, &compute, events.clone())
                    .await?;
                (compute, deployment, root)
            }
        };
        *stage = PipelineStage::StrategySelected;

        let JobSpecification {
            endpoint,
            storage,
            submission: mut parameters,
            ..
        } = spec;
        credentials::inject_storage_key(
            &mut parameters.conf,
            &root,
            storage.credential.as_ref(),
            events.as_ref(),
        );
        *stage = PipelineStage::CredentialInjected;

        let target = job_builder::submission_target(&query, endpoint.as_deref(), &compute);
        let job = job_builder::build_job(parameters, target, compute, deployment, events);
        *stage = PipelineStage::Built;
        Ok(job)
    }

    /// Fills a missing blob storage key from the secret provider.
    /// Returns whether the specification was changed. Specifications the
    /// pipeline would reject anyway are left alone.
    pub async fn prepare_credential(&self, spec: &mut JobSpecification) -> AppResult<bool> {
        if spec
            .storage
            .credential
            .as_ref()
            .is_some_and(|credential| !credential.is_blank())
        {
            return Ok(false);
        }
        if spec.storage.backend != StorageBackend::Blob {
            return Ok(false);
        }
        let Some(root) = spec
            .storage
            .upload_path
            .as_deref()
            .and_then(|path| path.parse::<WasbUri>().ok())
        else {
            return Ok(false);
        };
        match self
            .secrets
            .load_secret(STORAGE_KEY_SECRET_SERVICE, root.storage_account())
            .await?
        {
            Some(secret) => {
                tracing::debug!(
                    storage_account = root.storage_account(),
                    "loaded storage key from secret provider"
                );
                spec.storage.credential = Some(secret);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Running computes, optionally narrowed by tenant and workspace, sorted by workspace and name.
    pub async fn list_computes(
        &self,
        tenant: Option<&str>,
        workspace: Option<&str>,
    ) -> AppResult<Vec<ComputeHandle>> {
        let mut computes = self
            .inventory
            .list_computes()
            .await?
            .into_iter()
            .filter(|compute| compute.state.is_running())
            .filter(|compute| tenant.is_none_or(|tenant| compute.tenant == tenant))
            .filter(|compute| workspace.is_none_or(|workspace| compute.workspace == workspace))
            .collect::<Vec<_>>();
        computes.sort_by(|a, b| {
            (a.workspace.as_str(), a.name.as_str()).cmp(&(b.workspace.as_str(), b.name.as_str()))
        });
        Ok(computes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::app::ports::{ComputeStream, NoopTelemetry};
    use crate::app::types::{
        ComputeQuery, ComputeState, DeploymentHandle, JobConfiguration, MessageKind, Secret,
        StorageSettings, SubmissionParameters,
    };

    const SCENARIO_KEY: &str = "spark.hadoop.fs.azure.account.key.acct.blob.core.windows.net";

    struct MockInventory {
        computes: Vec<ComputeHandle>,
        fault: Option<AppError>,
        find_calls: Mutex<usize>,
    }

    impl MockInventory {
        fn with(computes: Vec<ComputeHandle>) -> Self {
            Self {
                computes,
                fault: None,
                find_calls: Mutex::new(0),
            }
        }

        fn failing(fault: AppError) -> Self {
            Self {
                computes: Vec::new(),
                fault: Some(fault),
                find_calls: Mutex::new(0),
            }
        }

        fn find_calls(&self) -> usize {
            *self.find_calls.lock().expect("find_calls lock")
        }
    }

    #[async_trait]
    impl ComputeInventoryPort for MockInventory {
        fn find_computes(&self, query: &ComputeQuery) -> ComputeStream {
            *self.find_calls.lock().expect("find_calls lock") += 1;
            let items: Vec<AppResult<ComputeHandle>> = match &self.fault {
                Some(fault) => vec![Err(fault.clone())],
                None => self
                    .computes
                    .iter()
                    .filter(|compute| query.matches(compute))
                    .cloned()
                    .map(Ok)
                    .collect(),
            };
            Box::pin(tokio_stream::iter(items))
        }

        async fn list_computes(&self) -> AppResult<Vec<ComputeHandle>> {
            Ok(self.computes.clone())
        }
    }

    struct MockDeployments {
        result: AppResult<DeploymentHandle>,
        seen_computes: Mutex<Vec<String>>,
    }

    impl MockDeployments {
        fn returning(result: AppResult<DeploymentHandle>) -> Self {
            Self {
                result,
                seen_computes: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen_computes.lock().expect("seen_computes lock").len()
        }
    }

    #[async_trait]
    impl DeploymentFactoryPort for MockDeployments {
        async fn build_deploy(
            &self,
            _spec: &JobSpecification,
            compute: &ComputeHandle,
            events: Arc<dyn EventSinkPort>,
        ) -> AppResult<DeploymentHandle> {
            self.seen_computes
                .lock()
                .expect("seen_computes lock")
                .push(compute.id.clone());
            events.send(JobEvent::info("deployment prepared"));
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct MapSecrets {
        secrets: HashMap<(String, String), String>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl SecretProviderPort for MapSecrets {
        async fn load_secret(&self, service: &str, key: &str) -> AppResult<Option<Secret>> {
            *self.calls.lock().expect("calls lock") += 1;
            Ok(self
                .secrets
                .get(&(service.to_string(), key.to_string()))
                .map(Secret::new))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<JobEvent>>,
    }

    impl RecordingSink {
        fn kinds(&self) -> Vec<MessageKind> {
            self.events
                .lock()
                .expect("events lock")
                .iter()
                .map(|event| event.kind)
                .collect()
        }
    }

    impl EventSinkPort for RecordingSink {
        fn send(&self, event: JobEvent) {
            self.events.lock().expect("events lock").push(event);
        }
    }

    #[derive(Default)]
    struct RecordingTelemetry {
        events: Mutex<Vec<(&'static str, TelemetryEvent)>>,
    }

    impl TelemetryPort for RecordingTelemetry {
        fn event(&self, name: &'static str, fields: TelemetryEvent) {
            self.events
                .lock()
                .expect("telemetry lock")
                .push((name, fields));
        }
    }

    fn compute_h() -> ComputeHandle {
        ComputeHandle {
            id: "H".to_string(),
            tenant: "T1".to_string(),
            workspace: "W1".to_string(),
            name: "C1".to_string(),
            endpoint: "https://w1.dev.example.net/livyApi/sparkPools/C1".to_string(),
            state: ComputeState::Running,
        }
    }

    fn deployment_d() -> DeploymentHandle {
        DeploymentHandle {
            backend: StorageBackend::Blob,
            storage_account: "acct".to_string(),
            destination: "wasb://root@acct.blob.core.windows.net/path/SparkSubmission/D/"
                .to_string(),
        }
    }

    fn scenario_spec() -> JobSpecification {
        JobSpecification {
            tenant: Some("T1".to_string()),
            workspace: Some("W1".to_string()),
            compute: Some("C1".to_string()),
            endpoint: None,
            storage: StorageSettings {
                backend: StorageBackend::Blob,
                upload_path: Some("wasb://root@acct.blob.core.windows.net/path".to_string()),
                credential: Some(Secret::new("KEY123")),
            },
            submission: SubmissionParameters {
                class_name: Some("com.example.Main".to_string()),
                conf: [
                    ("spark.executor.instances", "2"),
                    ("spark.driver.memory", "4g"),
                ]
                .into_iter()
                .collect(),
                ..SubmissionParameters::default()
            },
        }
    }

    struct Harness {
        usecases: UseCases,
        inventory: Arc<MockInventory>,
        deployments: Arc<MockDeployments>,
        telemetry: Arc<RecordingTelemetry>,
    }

    fn harness(inventory: MockInventory, deployments: MockDeployments) -> Harness {
        harness_with_secrets(inventory, deployments, MapSecrets::default())
    }

    fn harness_with_secrets(
        inventory: MockInventory,
        deployments: MockDeployments,
        secrets: MapSecrets,
    ) -> Harness {
        let inventory = Arc::new(inventory);
        let deployments = Arc::new(deployments);
        let telemetry = Arc::new(RecordingTelemetry::default());
        let usecases = UseCases::new(
            inventory.clone(),
            deployments.clone(),
            Arc::new(secrets),
            telemetry.clone(),
        );
        Harness {
            usecases,
            inventory,
            deployments,
            telemetry,
        }
    }

    fn default_harness() -> Harness {
        harness(
            MockInventory::with(vec![compute_h()]),
            MockDeployments::returning(Ok(deployment_d())),
        )
    }

    #[tokio::test]
    async fn scenario_builds_job_with_storage_key() {
        let h = default_harness();
        let sink = Arc::new(RecordingSink::default());
        let job = h
            .usecases
            .build_submittable_job(scenario_spec(), sink.clone())
            .await
            .expect("build job");

        assert_eq!(job.configuration().get(SCENARIO_KEY), Some("KEY123"));
        assert_eq!(job.compute(), &compute_h());
        assert_eq!(job.deployment(), &deployment_d());
        assert_eq!(h.inventory.find_calls(), 1);
        assert_eq!(
            *h.deployments.seen_computes.lock().expect("seen lock"),
            vec!["H".to_string()]
        );
        assert_eq!(job.target().tenant, "T1");
        assert_eq!(job.target().workspace, "W1");
        assert_eq!(job.target().endpoint, compute_h().endpoint);
        assert!(sink.kinds().iter().all(|kind| *kind == MessageKind::Info));
    }

    #[tokio::test]
    async fn injection_adds_exactly_one_key_and_keeps_the_rest() {
        let h = default_harness();
        let spec = scenario_spec();
        let before: JobConfiguration = spec.submission.conf.clone();
        let job = h
            .usecases
            .build_submittable_job(spec, Arc::new(RecordingSink::default()))
            .await
            .expect("build job");

        let after = job.configuration();
        assert_eq!(after.len(), before.len() + 1);
        for (key, value) in before.iter() {
            assert_eq!(after.get(key), Some(value), "{key}");
        }
        let added = after
            .iter()
            .filter(|(key, _)| !before.contains_key(key))
            .collect::<Vec<_>>();
        assert_eq!(added, vec![(SCENARIO_KEY, "KEY123")]);
    }

    #[tokio::test]
    async fn identical_runs_give_identical_configuration() {
        let h = default_harness();
        let first = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await
            .expect("first build");
        let second = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await
            .expect("second build");
        assert_eq!(first.configuration(), second.configuration());
        assert_eq!(first.batch_request(), second.batch_request());
    }

    #[tokio::test]
    async fn incomplete_addressing_never_reaches_inventory() {
        let cases: [fn(&mut JobSpecification); 4] = [
            |spec| spec.tenant = None,
            |spec| spec.workspace = None,
            |spec| spec.compute = None,
            |spec| spec.compute = Some("  ".to_string()),
        ];
        for mutate in cases {
            let h = default_harness();
            let mut spec = scenario_spec();
            mutate(&mut spec);
            let err = h
                .usecases
                .build_submittable_job(spec, Arc::new(RecordingSink::default()))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), AppErrorKind::ConfigurationIncomplete);
            assert_eq!(h.inventory.find_calls(), 0);
            assert_eq!(h.deployments.calls(), 0);
        }
    }

    #[tokio::test]
    async fn unsupported_backend_never_reaches_deployment() {
        for backend in StorageBackend::ALL
            .into_iter()
            .filter(|backend| *backend != StorageBackend::Blob)
        {
            let h = default_harness();
            let mut spec = scenario_spec();
            spec.storage.backend = backend;
            let err = h
                .usecases
                .build_submittable_job(spec, Arc::new(RecordingSink::default()))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), AppErrorKind::UnsupportedStorageBackend);
            assert!(err.message().contains(backend.as_str()));
            assert_eq!(h.deployments.calls(), 0);
            assert_eq!(h.inventory.find_calls(), 0);
        }
    }

    #[tokio::test]
    async fn missing_upload_path_rejected_before_selection() {
        for backend in [StorageBackend::Blob, StorageBackend::AdlsGen2] {
            let h = default_harness();
            let mut spec = scenario_spec();
            spec.storage.backend = backend;
            spec.storage.upload_path = None;
            let err = h
                .usecases
                .build_submittable_job(spec, Arc::new(RecordingSink::default()))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), AppErrorKind::MissingUploadPath);
            assert_eq!(h.inventory.find_calls(), 0);
            assert_eq!(h.deployments.calls(), 0);
        }
    }

    #[tokio::test]
    async fn unknown_compute_reports_workspace_name_and_tenant() {
        let h = harness(
            MockInventory::with(Vec::new()),
            MockDeployments::returning(Ok(deployment_d())),
        );
        let err = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::ComputeNotFound);
        for needle in ["W1", "C1", "T1"] {
            assert!(err.message().contains(needle), "{}", err.message());
        }
        assert_eq!(h.deployments.calls(), 0);
    }

    #[tokio::test]
    async fn inventory_fault_propagates_as_resolution_failure() {
        let h = harness(
            MockInventory::failing(AppError::local_error("inventory unavailable")),
            MockDeployments::returning(Ok(deployment_d())),
        );
        let err = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::ComputeResolution);
        assert!(err.message().contains("inventory unavailable"));
    }

    #[tokio::test]
    async fn deployment_failure_is_passed_through_unchanged() {
        let h = harness(
            MockInventory::with(vec![compute_h()]),
            MockDeployments::returning(Err(AppError::deployment_failure("container is locked")
                .with_context("acct"))),
        );
        let err = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::DeploymentFailure);
        assert_eq!(err.code(), codes::DEPLOYMENT_FAILURE);
        assert_eq!(err.message(), "container is locked");
        assert_eq!(err.context(), Some("acct"));
    }

    #[tokio::test]
    async fn explicit_endpoint_is_used_as_target() {
        let h = default_harness();
        let mut spec = scenario_spec();
        spec.endpoint = Some("https://livy.example.net/batches".to_string());
        let job = h
            .usecases
            .build_submittable_job(spec, Arc::new(RecordingSink::default()))
            .await
            .expect("build job");
        assert_eq!(job.target().endpoint, "https://livy.example.net/batches");
    }

    #[tokio::test]
    async fn missing_credential_builds_job_with_warning() {
        let h = default_harness();
        let sink = Arc::new(RecordingSink::default());
        let mut spec = scenario_spec();
        spec.storage.credential = None;
        let job = h
            .usecases
            .build_submittable_job(spec, sink.clone())
            .await
            .expect("build job");
        assert!(!job.configuration().contains_key(SCENARIO_KEY));
        assert!(sink.kinds().contains(&MessageKind::Warning));
    }

    #[tokio::test]
    async fn telemetry_records_failing_stage() {
        let h = harness(
            MockInventory::with(Vec::new()),
            MockDeployments::returning(Ok(deployment_d())),
        );
        let _ = h
            .usecases
            .build_submittable_job(scenario_spec(), Arc::new(RecordingSink::default()))
            .await;
        let events = h.telemetry.events.lock().expect("telemetry lock");
        let names = events.iter().map(|(name, _)| *name).collect::<Vec<_>>();
        assert_eq!(names, vec!["job.build.started", "job.build.failed"]);
        let failed = &events[1].1;
        assert_eq!(failed.stage, Some(PipelineStage::Validated.as_str()));
        assert_eq!(failed.error_code, Some(codes::COMPUTE_NOT_FOUND));
    }

    #[test]
    fn blocking_entry_point_builds_same_job() {
        let h = default_harness();
        let job = h
            .usecases
            .build_submittable_job_blocking(scenario_spec(), Arc::new(RecordingSink::default()))
            .expect("build job");
        assert_eq!(job.configuration().get(SCENARIO_KEY), Some("KEY123"));
    }

    #[tokio::test]
    async fn blocking_entry_point_refuses_to_run_inside_runtime() {
        let h = default_harness();
        let err = h
            .usecases
            .build_submittable_job_blocking(scenario_spec(), Arc::new(RecordingSink::default()))
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::Internal);
        assert_eq!(err.code(), codes::LOCAL_ERROR);
        assert_eq!(h.inventory.find_calls(), 0);
    }

    #[tokio::test]
    async fn blank_endpoint_targets_compute_endpoint() {
        let h = default_harness();
        let mut spec = scenario_spec();
        spec.endpoint = Some(String::new());
        let job = h
            .usecases
            .build_submittable_job(spec, Arc::new(RecordingSink::default()))
            .await
            .expect("build job");
        assert_eq!(job.target().endpoint, compute_h().endpoint);
    }

    #[tokio::test]
    async fn unparseable_blob_root_never_reaches_inventory() {
        let h = default_harness();
        let mut spec = scenario_spec();
        spec.storage.upload_path = Some("/local/dir".to_string());
        let err = h
            .usecases
            .build_submittable_job(spec, Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::InvalidUploadPath);
        assert!(err.message().contains("/local/dir"), "{}", err.message());
        assert_eq!(h.inventory.find_calls(), 0);
        assert_eq!(h.deployments.calls(), 0);
    }

    #[tokio::test]
    async fn padded_addressing_is_quoted_as_supplied() {
        let h = default_harness();
        let mut spec = scenario_spec();
        spec.tenant = Some(" T1 ".to_string());
        let err = h
            .usecases
            .build_submittable_job(spec, Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::ComputeNotFound);
        assert!(err.message().ends_with("at tenant  T1 "), "{}", err.message());
        assert_eq!(h.inventory.find_calls(), 1);
    }

    #[tokio::test]
    async fn prepare_credential_fills_missing_key_from_provider() {
        let mut secrets = MapSecrets::default();
        secrets.secrets.insert(
            (STORAGE_KEY_SECRET_SERVICE.to_string(), "acct".to_string()),
            "FROM_STORE".to_string(),
        );
        let h = harness_with_secrets(
            MockInventory::with(vec![compute_h()]),
            MockDeployments::returning(Ok(deployment_d())),
            secrets,
        );
        let mut spec = scenario_spec();
        spec.storage.credential = None;
        assert!(h.usecases.prepare_credential(&mut spec).await.expect("prepare"));
        assert_eq!(
            spec.storage.credential.as_ref().map(Secret::expose),
            Some("FROM_STORE")
        );
    }

    #[tokio::test]
    async fn prepare_credential_keeps_supplied_key_and_skips_unusable_specs() {
        let h = default_harness();

        let mut supplied = scenario_spec();
        assert!(!h.usecases.prepare_credential(&mut supplied).await.expect("prepare"));
        assert_eq!(
            supplied.storage.credential.as_ref().map(Secret::expose),
            Some("KEY123")
        );

        let mut no_path = scenario_spec();
        no_path.storage.credential = None;
        no_path.storage.upload_path = None;
        assert!(!h.usecases.prepare_credential(&mut no_path).await.expect("prepare"));

        let mut other_backend = scenario_spec();
        other_backend.storage.credential = None;
        other_backend.storage.backend = StorageBackend::Webhdfs;
        assert!(!h.usecases.prepare_credential(&mut other_backend).await.expect("prepare"));
    }

    #[tokio::test]
    async fn list_computes_keeps_running_pools_sorted() {
        let mut stopped = compute_h();
        stopped.name = "C0".to_string();
        stopped.state = ComputeState::Stopped;
        let mut other_workspace = compute_h();
        other_workspace.workspace = "A0".to_string();
        other_workspace.name = "Z9".to_string();
        let mut other_tenant = compute_h();
        other_tenant.tenant = "T2".to_string();
        other_tenant.name = "C2".to_string();
        let h = harness(
            MockInventory::with(vec![
                compute_h(),
                stopped,
                other_workspace,
                other_tenant,
            ]),
            MockDeployments::returning(Ok(deployment_d())),
        );

        let all = h.usecases.list_computes(None, None).await.expect("list");
        let names = all.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Z9", "C1", "C2"]);

        let scoped = h
            .usecases
            .list_computes(Some("T1"), Some("W1"))
            .await
            .expect("list scoped");
        assert_eq!(scoped, vec![compute_h()]);
    }

    #[test]
    fn noop_telemetry_is_usable_as_port() {
        let telemetry: Arc<dyn TelemetryPort> = Arc::new(NoopTelemetry);
        telemetry.event("job.build.started", TelemetryEvent::default());
    }
}
