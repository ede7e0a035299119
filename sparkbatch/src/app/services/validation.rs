// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::errors::{AppError, AppErrorKind, AppResult, codes};
use crate::app::types::{ComputeQuery, JobSpecification};

/// Checks the addressing fields and the optional endpoint. Pure; no I/O.
pub fn validate(spec: &JobSpecification) -> AppResult<ComputeQuery> {
    let query = validate_addressing(spec)?;
    // blank means absent; the compute's own endpoint is used then
    if let Some(endpoint) = present(spec.endpoint.as_deref()) {
        validate_endpoint(endpoint)?;
    }
    Ok(query)
}

pub fn validate_addressing(spec: &JobSpecification) -> AppResult<ComputeQuery> {
    // blank values count as missing; present ones are passed on as supplied
    let tenant = supplied(spec.tenant.as_deref());
    let workspace = supplied(spec.workspace.as_deref());
    let compute = supplied(spec.compute.as_deref());
    match (tenant, workspace, compute) {
        (Some(tenant), Some(workspace), Some(name)) => Ok(ComputeQuery {
            tenant: tenant.to_string(),
            workspace: workspace.to_string(),
            name: name.to_string(),
        }),
        _ => {
            tracing::warn!(
                tenant = ?spec.tenant,
                workspace = ?spec.workspace,
                compute = ?spec.compute,
                "spark compute is not selected"
            );
            Err(AppError::configuration_incomplete(format!(
                "spark compute is not selected (tenant: {}, workspace: {}, compute: {})",
                seen(spec.tenant.as_deref()),
                seen(spec.workspace.as_deref()),
                seen(spec.compute.as_deref()),
            )))
        }
    }
}

pub fn validate_endpoint(endpoint: &str) -> AppResult<()> {
    let invalid = || {
        AppError::with_message(
            AppErrorKind::InvalidEndpoint,
            codes::INVALID_ENDPOINT,
            format!("submission endpoint {endpoint:?} is not an absolute http(s) URI"),
        )
    };
    let (scheme, rest) = endpoint.trim().split_once("://").ok_or_else(invalid)?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err(invalid());
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn seen(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{value:?}"),
        None => "<none>".to_string(),
    }
}
