// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::env;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, Registry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FILTER_ENV_VAR: &str = "SPARKBATCH_LOG";
const FORMAT_ENV_VAR: &str = "SPARKBATCH_LOG_FORMAT";
const SPAN_EVENTS_ENV_VAR: &str = "SPARKBATCH_LOG_SPAN_EVENTS";
const FILE_ENV_VAR: &str = "SPARKBATCH_LOG_FILE";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Installs the global subscriber. Console output goes to stderr; stdout is
/// reserved for command output.
pub fn init(verbose: bool) {
    let filter = build_filter(verbose);
    let span_events = parse_span_events(env_value(SPAN_EVENTS_ENV_VAR).as_deref());
    let format = parse_format(env_value(FORMAT_ENV_VAR).as_deref());
    let file_writer = build_file_writer();
    let registry = Registry::default()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let guard = match format {
        LogFormat::Json => {
            let console = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events.clone())
                .with_writer(std::io::stderr);
            let (file, guard) = split_writer(file_writer);
            let file = file.map(|writer| {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_timer(UtcTime::rfc_3339())
                    .with_span_events(span_events)
                    .with_writer(writer)
            });
            registry.with(console).with(file).init();
            guard
        }
        LogFormat::Pretty => {
            let console = tracing_subscriber::fmt::layer()
                .pretty()
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events.clone())
                .with_writer(std::io::stderr);
            let (file, guard) = split_writer(file_writer);
            let file = file.map(|writer| {
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_timer(UtcTime::rfc_3339())
                    .with_span_events(span_events)
                    .with_writer(writer)
            });
            registry.with(console).with(file).init();
            guard
        }
        LogFormat::Compact => {
            let console = tracing_subscriber::fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events.clone())
                .with_writer(std::io::stderr);
            let (file, guard) = split_writer(file_writer);
            let file = file.map(|writer| {
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_timer(UtcTime::rfc_3339())
                    .with_span_events(span_events)
                    .with_writer(writer)
            });
            registry.with(console).with(file).init();
            guard
        }
    };
    if let Some(guard) = guard {
        let _ = FILE_GUARD.set(guard);
    }
}

fn split_writer(
    writer: Option<(NonBlocking, WorkerGuard)>,
) -> (Option<NonBlocking>, Option<WorkerGuard>) {
    match writer {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn build_filter(verbose: bool) -> EnvFilter {
    match env::var(FILTER_ENV_VAR) {
        Ok(value) => EnvFilter::new(value),
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("sparkbatch=info"),
    }
}

fn parse_format(value: Option<&str>) -> LogFormat {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::Compact,
    }
}

fn parse_span_events(value: Option<&str>) -> FmtSpan {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("new") => FmtSpan::NEW,
        Some("enter") => FmtSpan::ENTER,
        Some("exit") => FmtSpan::EXIT,
        Some("close") => FmtSpan::CLOSE,
        Some("full") => FmtSpan::FULL,
        _ => FmtSpan::NONE,
    }
}

fn build_file_writer() -> Option<(NonBlocking, WorkerGuard)> {
    let file_path = env_value(FILE_ENV_VAR)?;
    let path = Path::new(&file_path);
    let file_name = path.file_name()?.to_string_lossy().to_string();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}
