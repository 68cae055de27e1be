use anyhow::Result;

use team_reports::cli::Command;
use team_reports::{
    handle_completions, handle_export, handle_import, handle_member, handle_serve, handle_summary, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port, data, static_dir } => handle_serve(*port, data.clone(), static_dir.clone()),
        Command::Summary { api_url, top } => handle_summary(api_url.clone(), *top),
        Command::Member { name, api_url } => handle_member(name, api_url.clone()),
        Command::Export { format, output, data } => handle_export(*format, output.as_ref(), data.clone()),
        Command::Import { file, data } => handle_import(file, data.clone()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
