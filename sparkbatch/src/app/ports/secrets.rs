// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use async_trait::async_trait;

use crate::app::errors::AppResult;
use crate::app::types::Secret;

#[async_trait]
/// Credential lookup, injected where credentials are prepared.
/// The job pipeline itself only reads the credential already on the specification.
pub trait SecretProviderPort: Send + Sync {
    async fn load_secret(&self, service: &str, key: &str) -> AppResult<Option<Secret>>;
}
