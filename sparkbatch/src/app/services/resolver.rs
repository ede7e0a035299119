// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tokio_stream::StreamExt;

use crate::app::errors::{AppError, AppErrorKind, AppResult, codes};
use crate::app::ports::ComputeInventoryPort;
use crate::app::types::{ComputeHandle, ComputeQuery};

/// Resolves `query` to exactly one compute, or fails with `ComputeNotFound`.
///
/// Only the first inventory item is awaited; the stream is dropped afterwards,
/// so an inventory listing several matches yields its first one.
pub async fn resolve_compute(
    inventory: &dyn ComputeInventoryPort,
    query: &ComputeQuery,
) -> AppResult<ComputeHandle> {
    let mut matches = inventory.find_computes(query);
    match matches.next().await {
        Some(Ok(compute)) => {
            tracing::debug!(
                compute_id = %compute.id,
                state = compute.state.as_str(),
                "resolved spark compute"
            );
            Ok(compute)
        }
        Some(Err(err)) => Err(AppError::compute_resolution(format!(
            "failed to look up spark compute ({}:{}) at tenant {}: {}",
            query.workspace, query.name, query.tenant, err
        ))
        .with_context(err.code())),
        None => Err(AppError::with_message(
            AppErrorKind::ComputeNotFound,
            codes::COMPUTE_NOT_FOUND,
            format!(
                "can't find spark compute ({}:{}) at tenant {}",
                query.workspace, query.name, query.tenant
            ),
        )),
    }
}
