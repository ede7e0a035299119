// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::types::JobSpecification;

/// Loads a job specification from a TOML file.
pub fn read_job_spec(path: &Path) -> Result<JobSpecification> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read job file {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse job file {}", path.display()))
}
