// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::app::errors::AppResult;
use crate::app::types::{ComputeHandle, ComputeQuery};

/// Finite, lazily produced sequence of inventory matches.
pub type ComputeStream = Pin<Box<dyn Stream<Item = AppResult<ComputeHandle>> + Send>>;

#[async_trait]
/// Remote inventory of Spark pools, keyed by tenant, workspace and pool name.
/// Caching, paging and retries belong to the adapter.
pub trait ComputeInventoryPort: Send + Sync {
    /// Streams every compute matching `query`. A transport fault is yielded as an `Err` item.
    fn find_computes(&self, query: &ComputeQuery) -> ComputeStream;

    async fn list_computes(&self) -> AppResult<Vec<ComputeHandle>>;
}
