// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod clock;
pub mod compute_inventory;
pub mod deployment;
pub mod event_sink;
pub mod secrets;
pub mod telemetry;

pub use clock::ClockPort;
pub use compute_inventory::{ComputeInventoryPort, ComputeStream};
pub use deployment::DeploymentFactoryPort;
pub use event_sink::EventSinkPort;
pub use secrets::SecretProviderPort;
pub use telemetry::{NoopTelemetry, TelemetryEvent, TelemetryPort};
