// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

#[derive(Clone, Debug, Default)]
pub struct TelemetryEvent {
    pub tenant: Option<String>,
    pub workspace: Option<String>,
    pub compute: Option<String>,
    pub backend: Option<&'static str>,
    pub stage: Option<&'static str>,
    pub error_code: Option<&'static str>,
}

pub trait TelemetryPort: Send + Sync {
    fn event(&self, name: &'static str, fields: TelemetryEvent);
}

// Used by tests and callers that do not export telemetry.
#[derive(Clone, Default)]
pub struct NoopTelemetry;

impl TelemetryPort for NoopTelemetry {
    fn event(&self, _name: &'static str, _fields: TelemetryEvent) {}
}
