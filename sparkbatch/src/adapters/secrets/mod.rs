// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use async_trait::async_trait;

use crate::app::errors::{AppError, AppResult};
use crate::app::ports::SecretProviderPort;
use crate::app::types::Secret;

pub const SECRET_ENV_PREFIX: &str = "SPARKBATCH_SECRET";

/// Reads secrets from `SPARKBATCH_SECRET_<SERVICE>_<KEY>` environment variables.
#[derive(Clone, Debug)]
pub struct EnvSecretProvider {
    prefix: String,
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self::with_prefix(SECRET_ENV_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn variable_name(&self, service: &str, key: &str) -> String {
        format!("{}_{}_{}", self.prefix, env_segment(service), env_segment(key))
    }
}

fn env_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl SecretProviderPort for EnvSecretProvider {
    async fn load_secret(&self, service: &str, key: &str) -> AppResult<Option<Secret>> {
        let name = self.variable_name(service, key);
        match std::env::var(&name) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(Secret::new(value))),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(AppError::local_error(format!(
                "secret variable {name} is not valid unicode"
            ))),
        }
    }
}
