// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde_json::{Value, json};

use crate::app::services::credentials::STORAGE_KEY_NAMESPACE;
use crate::app::types::{ComputeHandle, JobEvent};
use crate::app::usecases::SubmittableJob;

pub const REDACTED: &str = "<redacted>";

pub fn compute_to_json(item: &ComputeHandle) -> Value {
    json!({
        "id": item.id.as_str(),
        "tenant": item.tenant.as_str(),
        "workspace": item.workspace.as_str(),
        "name": item.name.as_str(),
        "endpoint": item.endpoint.as_str(),
        "state": item.state.as_str(),
    })
}

pub fn job_to_json(job: &SubmittableJob, show_secrets: bool) -> Value {
    let mut batch = job.batch_request();
    if !show_secrets {
        redact_storage_keys(&mut batch);
    }
    let deployment = job.deployment();
    json!({
        "target": {
            "tenant": job.target().tenant.as_str(),
            "workspace": job.target().workspace.as_str(),
            "endpoint": job.target().endpoint.as_str(),
        },
        "compute": compute_to_json(job.compute()),
        "deployment": {
            "backend": deployment.backend.as_str(),
            "storage_account": deployment.storage_account.as_str(),
            "destination": deployment.destination.as_str(),
        },
        "batch": batch,
    })
}

fn redact_storage_keys(batch: &mut Value) {
    let Some(conf) = batch.get_mut("conf").and_then(Value::as_object_mut) else {
        return;
    };
    for (key, value) in conf.iter_mut() {
        if key.starts_with(STORAGE_KEY_NAMESPACE) {
            *value = Value::String(REDACTED.to_string());
        }
    }
}

pub fn format_json(value: Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn format_computes_json(computes: &[ComputeHandle]) -> anyhow::Result<String> {
    let data: Vec<Value> = computes.iter().map(compute_to_json).collect();
    format_json(Value::Array(data))
}

fn str_width(value: &str) -> usize {
    value.chars().count()
}

pub fn format_computes_table(computes: &[ComputeHandle]) -> String {
    let headers = ["workspace", "name", "tenant", "endpoint"];
    let mut widths = headers.map(str_width);
    for item in computes {
        let cells = [&item.workspace, &item.name, &item.tenant, &item.endpoint];
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(str_width(cell));
        }
    }

    let mut output = String::new();
    let mut push_row = |cells: [&str; 4]| {
        output.push_str(&format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}\n",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    };
    push_row(headers);
    for item in computes {
        push_row([
            item.workspace.as_str(),
            item.name.as_str(),
            item.tenant.as_str(),
            item.endpoint.as_str(),
        ]);
    }
    output
}

/// One stderr line per pipeline event.
pub fn format_event(event: &JobEvent) -> String {
    format!("[{}] {}", event.kind.as_str(), event.message)
}
