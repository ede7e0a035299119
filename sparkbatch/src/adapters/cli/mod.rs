// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod format;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sparkbatch",
    version,
    about = "Assemble Spark batch jobs for remote Spark pools",
    long_about = None,
    after_help = "Configuration precedence: defaults < config file < command-line flags.\n\
Config path precedence: defaults < SPARKBATCH_CONFIG_PATH < command-line flags.\n\
Storage keys missing from a job file are read from SPARKBATCH_SECRET_AZURE_STORAGE_<ACCOUNT>.\n\
Paths in the config file are resolved relative to the config file directory; paths passed as flags are resolved relative to the current working directory."
)]
pub struct Opts {
    #[arg(
        short,
        long,
        global = true,
        value_name = "PATH",
        help = "Path to a TOML config file. When omitted, sparkbatch uses SPARKBATCH_CONFIG_PATH if set, otherwise the default config file location if available."
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Path to the compute inventory file. Overrides `inventory_path` from the config file."
    )]
    pub inventory_path: Option<PathBuf>,
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::SetTrue,
        help = "Enable debug logging and include logs from dependencies. Overrides `verbose` from the config file."
    )]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a job file and print the assembled job.
    Build {
        #[arg(long, value_name = "PATH", help = "Path to the job specification (TOML).")]
        job: PathBuf,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Print storage keys instead of redacting them."
        )]
        show_secrets: bool,
    },
    /// List running computes from the inventory.
    Computes {
        #[arg(long, value_name = "TENANT")]
        tenant: Option<String>,
        #[arg(long, value_name = "WORKSPACE")]
        workspace: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Print JSON instead of a table.")]
        json: bool,
    },
}

pub struct ParsedOpts {
    pub opts: Opts,
    pub verbose_override: Option<bool>,
}

impl ParsedOpts {
    fn from_opts(opts: Opts) -> Self {
        // an absent flag must not override `verbose = true` from the config file
        let verbose_override = opts.verbose.then_some(true);
        Self {
            opts,
            verbose_override,
        }
    }
}

pub fn cli_command() -> clap::Command {
    Opts::command()
}

pub fn parse_opts() -> ParsedOpts {
    let matches = cli_command().get_matches();
    let opts = Opts::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    ParsedOpts::from_opts(opts)
}
