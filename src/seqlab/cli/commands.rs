//! Command handlers.
//!
//! Each handler builds what it needs from the parsed arguments, calls the
//! [`SeqlabApi`] and prints. Handlers return `Ok(false)` when the command ran
//! but its outcome should produce a failing exit status.

use super::print::{print_config, print_messages, print_reallocations, print_report};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use seqlab::api::{ConfigAction, ScriptReport, SeqlabApi};
use seqlab::config::SeqlabConfig;
use seqlab::error::{Result, SeqlabError};
use seqlab::logging::init_logging;
use seqlab::seq::AppendMode;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "SEQLAB_CONFIG_DIR";

struct AppContext {
    config: SeqlabConfig,
    config_dir: PathBuf,
}

impl AppContext {
    fn api(&self, mode: Option<AppendMode>) -> SeqlabApi {
        let api = SeqlabApi::new(&self.config, self.config_dir.clone());
        match mode {
            Some(mode) => api.with_mode(mode),
            None => api,
        }
    }
}

pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Run { files, json, mode } => handle_run(&ctx, &files, json, mode),
        Commands::Eval {
            statements,
            json,
            mode,
        } => handle_eval(&ctx, &statements, json, mode),
        Commands::Growth { count, mode, json } => handle_growth(&ctx, count, mode, json),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = resolve_config_dir(cli.config_dir.clone())?;
    let config = SeqlabConfig::load(&config_dir)?;
    if !config.color {
        colored::control::set_override(false);
    }
    tracing::debug!(dir = %config_dir.display(), "config directory");
    Ok(AppContext { config, config_dir })
}

/// `--config-dir`, then `SEQLAB_CONFIG_DIR`, then the platform config dir.
fn resolve_config_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "seqlab")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SeqlabError::Config("Could not determine config dir".to_string()))
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    report: ScriptReport,
}

fn handle_run(
    ctx: &AppContext,
    files: &[PathBuf],
    json: bool,
    mode: Option<AppendMode>,
) -> Result<bool> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let source = std::fs::read_to_string(file)?;
        let report = ctx
            .api(mode)
            .run_script(&source)
            .map_err(|e| SeqlabError::Api(format!("{}: {}", file.display(), e)))?;
        reports.push(FileReport {
            file: file.as_path(),
            report,
        });
    }

    let succeeded = reports.iter().all(|r| r.report.succeeded());
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(succeeded);
    }

    for (i, entry) in reports.iter().enumerate() {
        if files.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("== {} ==", entry.file.display());
        }
        print_report(&entry.report);
    }
    Ok(succeeded)
}

fn handle_eval(
    ctx: &AppContext,
    statements: &[String],
    json: bool,
    mode: Option<AppendMode>,
) -> Result<bool> {
    let report = ctx.api(mode).run_script(&statements.join("\n"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report.succeeded())
}

fn handle_growth(
    ctx: &AppContext,
    count: usize,
    mode: Option<AppendMode>,
    json: bool,
) -> Result<bool> {
    let result = ctx.api(mode).growth(count)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.reallocations)?);
    } else {
        print_reallocations(&result.reallocations);
        print_messages(&result.messages);
    }
    Ok(true)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<bool> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api(None).config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        let dir = resolve_config_dir(Some(PathBuf::from("/tmp/flag"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/flag"));
    }
}
