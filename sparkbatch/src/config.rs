// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::adapters::deploy::DEFAULT_DEPLOY_ROOT;

const APP_DIR_NAME: &str = "sparkbatch";
const CONFIG_FILE_NAME: &str = "sparkbatch.toml";
const CONFIG_ENV_VAR: &str = "SPARKBATCH_CONFIG_PATH";
const INVENTORY_FILE_NAME: &str = "inventory.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    inventory_path: Option<String>,
    deploy_root: Option<String>,
    verbose: Option<bool>,
}

#[derive(Debug)]
pub struct Config {
    pub inventory_path: PathBuf,
    pub deploy_root: String,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Env,
    ConfigFile,
    Default,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::Override => "override",
            ConfigSource::Env => "env",
            ConfigSource::ConfigFile => "config",
            ConfigSource::Default => "default",
        }
    }
}

#[derive(Debug)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

#[derive(Debug)]
pub struct ConfigReport {
    pub config_path: Option<PathBuf>,
    pub config_path_source: Option<ConfigSource>,
    pub config_file_present: bool,
    pub inventory_path: ConfigValue<PathBuf>,
    pub deploy_root: ConfigValue<String>,
    pub verbose: ConfigValue<bool>,
}

impl ConfigReport {
    pub fn log(&self) {
        match (&self.config_path, self.config_path_source) {
            (Some(path), Some(source)) => tracing::info!(
                path = %path.display(),
                source = source.as_str(),
                present = self.config_file_present,
                "config path"
            ),
            (Some(path), None) => tracing::info!(
                path = %path.display(),
                present = self.config_file_present,
                "config path"
            ),
            (None, _) => tracing::info!("config path: (none)"),
        }
        tracing::info!(
            value = %self.inventory_path.value.display(),
            source = self.inventory_path.source.as_str(),
            "config inventory_path"
        );
        tracing::info!(
            value = %self.deploy_root.value,
            source = self.deploy_root.source.as_str(),
            "config deploy_root"
        );
        tracing::info!(
            value = self.verbose.value,
            source = self.verbose.source.as_str(),
            "config verbose"
        );
    }
}

#[derive(Debug)]
pub struct LoadResult {
    pub config: Config,
    pub report: ConfigReport,
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub inventory_path: Option<PathBuf>,
    pub verbose: Option<bool>,
}

pub fn load_with_report(
    config_path_override: Option<PathBuf>,
    overrides: Overrides,
) -> Result<LoadResult> {
    let (config_path, config_path_source, required) = match config_path_override {
        Some(path) => (Some(expand_path(path)), Some(ConfigSource::Override), true),
        None => match config_path_from_env()? {
            Some(path) => (Some(expand_path(path)), Some(ConfigSource::Env), true),
            None => match default_config_path().ok() {
                Some(path) => (Some(path), Some(ConfigSource::Default), false),
                None => (None, None, false),
            },
        },
    };
    let config_file_present = config_path
        .as_deref()
        .map(|path| path.exists())
        .unwrap_or(false);

    let file_config = match config_path.as_deref() {
        Some(path) => read_config_file(path, required)?,
        None => FileConfig::default(),
    };

    let (inventory_path, inventory_source) = match overrides.inventory_path {
        Some(path) => (expand_path(path), ConfigSource::Override),
        None => match file_config.inventory_path {
            Some(raw) => (
                resolve_path(&raw, config_path.as_deref().and_then(|path| path.parent())),
                ConfigSource::ConfigFile,
            ),
            None => (
                default_inventory_path().with_context(|| {
                    "failed to resolve default inventory path; specify --inventory-path or set inventory_path in the config file"
                })?,
                ConfigSource::Default,
            ),
        },
    };

    let (deploy_root, deploy_root_source) = match file_config.deploy_root {
        Some(raw) => (raw.trim().trim_matches('/').to_string(), ConfigSource::ConfigFile),
        None => (DEFAULT_DEPLOY_ROOT.to_string(), ConfigSource::Default),
    };
    if deploy_root.is_empty() {
        anyhow::bail!("deploy_root must not be empty");
    }

    let (verbose, verbose_source) = match overrides.verbose {
        Some(verbose) => (verbose, ConfigSource::Override),
        None => match file_config.verbose {
            Some(verbose) => (verbose, ConfigSource::ConfigFile),
            None => (false, ConfigSource::Default),
        },
    };

    let config = Config {
        inventory_path,
        deploy_root,
        verbose,
        config_path: config_path.clone(),
    };

    let report = ConfigReport {
        config_path,
        config_path_source,
        config_file_present,
        inventory_path: ConfigValue {
            value: config.inventory_path.clone(),
            source: inventory_source,
        },
        deploy_root: ConfigValue {
            value: config.deploy_root.clone(),
            source: deploy_root_source,
        },
        verbose: ConfigValue {
            value: config.verbose,
            source: verbose_source,
        },
    };

    Ok(LoadResult { config, report })
}

fn read_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() {
        if required {
            anyhow::bail!("config file not found at {}", path.display());
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn resolve_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        return path;
    }
    match base_dir {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn expand_path(path: PathBuf) -> PathBuf {
    let path_string = path.to_string_lossy().to_string();
    let expanded = shellexpand::tilde(&path_string);
    PathBuf::from(expanded.as_ref())
}

fn config_path_from_env() -> Result<Option<PathBuf>> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) => {
            if value.is_empty() {
                anyhow::bail!("{CONFIG_ENV_VAR} is set but empty");
            }
            Ok(Some(PathBuf::from(value)))
        }
        None => Ok(None),
    }
}

fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to resolve config directory")?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_inventory_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("failed to resolve data directory")?;
    Ok(base.join(APP_DIR_NAME).join(INVENTORY_FILE_NAME))
}
