// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use sparkbatch::adapters::cli::{self, Command, format};
use sparkbatch::adapters::deploy::BlobDeploymentFactory;
use sparkbatch::adapters::events::ChannelEventSink;
use sparkbatch::adapters::inventory::FileInventory;
use sparkbatch::adapters::jobfile;
use sparkbatch::adapters::secrets::EnvSecretProvider;
use sparkbatch::adapters::telemetry::TracingTelemetry;
use sparkbatch::adapters::time::SystemClock;
use sparkbatch::app::errors::{AppError, EXIT_CODE_OTHER};
use sparkbatch::app::usecases::UseCases;
use sparkbatch::{config, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map(|app| app.kind().exit_code())
                .unwrap_or(EXIT_CODE_OTHER);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let parsed = cli::parse_opts();
    let opts = parsed.opts;
    let config::LoadResult { config, report } = config::load_with_report(
        opts.config,
        config::Overrides {
            inventory_path: opts.inventory_path,
            verbose: parsed.verbose_override,
        },
    )?;
    logging::init(config.verbose);
    report.log();

    let usecases = UseCases::new(
        Arc::new(FileInventory::new(&config.inventory_path)),
        Arc::new(BlobDeploymentFactory::new(
            Arc::new(SystemClock::new()),
            config.deploy_root.clone(),
        )),
        Arc::new(EnvSecretProvider::new()),
        Arc::new(TracingTelemetry::new()),
    );

    match opts.command {
        Command::Build { job, show_secrets } => build(&usecases, &job, show_secrets).await,
        Command::Computes {
            tenant,
            workspace,
            json,
        } => {
            let computes = usecases
                .list_computes(tenant.as_deref(), workspace.as_deref())
                .await?;
            if json {
                println!("{}", format::format_computes_json(&computes)?);
            } else {
                print!("{}", format::format_computes_table(&computes));
            }
            Ok(())
        }
    }
}

async fn build(usecases: &UseCases, job_path: &Path, show_secrets: bool) -> anyhow::Result<()> {
    let mut spec = jobfile::read_job_spec(job_path)?;
    usecases
        .prepare_credential(&mut spec)
        .await
        .context("failed to load storage key")?;

    let (sink, mut rx) = ChannelEventSink::new();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            eprintln!("{}", format::format_event(&event));
        }
    });

    let result = usecases
        .build_submittable_job(spec, Arc::new(sink))
        .await
        .map(|job| format::job_to_json(&job, show_secrets));
    // the built job held the last sender; the printer drains and stops
    let _ = printer.await;

    let rendered = format::format_json(result?)?;
    println!("{rendered}");
    Ok(())
}
