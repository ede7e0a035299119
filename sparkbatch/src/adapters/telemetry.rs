// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::ports::{TelemetryEvent, TelemetryPort};

#[derive(Clone, Default)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetryPort for TracingTelemetry {
    fn event(&self, name: &'static str, fields: TelemetryEvent) {
        let TelemetryEvent {
            tenant,
            workspace,
            compute,
            backend,
            stage,
            error_code,
        } = fields;

        tracing::info!(
            target: "sparkbatch::telemetry",
            event = name,
            tenant = tenant.as_deref(),
            workspace = workspace.as_deref(),
            compute = compute.as_deref(),
            backend = backend,
            stage = stage,
            error_code = error_code,
        );
    }
}
