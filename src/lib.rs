pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod http;
pub mod rating;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::export::ExportFormat;
use crate::services::server::ServerService;
use crate::services::summary::SummaryService;
use crate::services::transfer::TransferService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16, data: Option<PathBuf>, static_dir: Option<PathBuf>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::new();
        if let Some(path) = data {
            config.store.data_path = path;
        }
        let service = ServerService::new(port, config, static_dir);
        service.run().await
    })
}

pub fn handle_summary(api_url: Option<String>, top: Option<usize>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::new();
        if let Some(url) = api_url {
            config.set_api_url(&url);
        }
        if let Some(top) = top {
            config.set_top_performers(top);
        }
        let service = SummaryService::new(&config)?;
        service.run().await
    })
}

pub fn handle_member(name: &str, api_url: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::new();
        if let Some(url) = api_url {
            config.set_api_url(&url);
        }
        let service = SummaryService::new(&config)?;
        service.run_member(name).await
    })
}

pub fn handle_export(format: ExportFormat, output: Option<&PathBuf>, data: Option<PathBuf>) -> Result<()> {
    let service = TransferService::new(data_path(data));
    service.export(format, output)
}

pub fn handle_import(file: &Path, data: Option<PathBuf>) -> Result<()> {
    let service = TransferService::new(data_path(data));
    let summary = service.import(file)?;
    info!("Import finished: {} created, {} replaced", summary.created, summary.replaced);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn data_path(data: Option<PathBuf>) -> PathBuf {
    data.unwrap_or_else(|| AppConfig::new().store.data_path)
}
