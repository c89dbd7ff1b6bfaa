//! Config command - View and check docguard configuration
//!
//! Provides the `docguard config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors
//! 3. Prints the path the configuration is read from

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use docguard_core::config::Config;

use crate::context::AppContext;
use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &AppContext, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(ctx, format),
            ConfigCommand::Validate => execute_validate(ctx, format),
            ConfigCommand::Path => execute_path(ctx, format),
        }
    }
}

fn execute_show(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let formatter = format.formatter();
    info!(config_path = %ctx.config_path.display(), "Showing configuration");

    if format.is_json() {
        let json = serde_json::to_value(&ctx.config)
            .context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
        return Ok(());
    }

    let source = if ctx.config_path.exists() {
        ctx.config_path.display().to_string()
    } else {
        format!("defaults; {} not found", ctx.config_path.display())
    };
    formatter.success(&format!("Configuration ({source})"));
    formatter.info("");

    let yaml =
        serde_yaml::to_string(&ctx.config).context("Failed to serialize configuration to YAML")?;
    for line in yaml.lines() {
        formatter.info(line);
    }
    Ok(())
}

fn execute_validate(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let formatter = format.formatter();
    let report = validation_report(&ctx.config_path);

    if format.is_json() {
        formatter.print_json(&report);
        return Ok(());
    }

    let errors: Vec<&str> = report["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e.as_str()).collect())
        .unwrap_or_default();

    if report["found"] == false {
        formatter.info(&format!(
            "Configuration file not found at {}",
            ctx.config_path.display()
        ));
        formatter.info("Using default configuration.");
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", ctx.config_path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error{}:",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ));
        formatter.info(&format!("File: {}", ctx.config_path.display()));
        formatter.info("");
        for error in errors {
            formatter.info(&format!("  {error}"));
        }
    }
    Ok(())
}

fn execute_path(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let formatter = format.formatter();
    if format.is_json() {
        formatter.print_json(&serde_json::json!({
            "config_path": ctx.config_path.display().to_string(),
            "exists": ctx.config_path.exists(),
            "explicit": ctx.explicit,
        }));
    } else {
        println!("{}", ctx.config_path.display());
    }
    Ok(())
}

/// Loads the file at `path` and validates it
///
/// A missing file is reported as `found: false` and is not an error; the
/// built-in defaults apply.
fn validation_report(path: &Path) -> serde_json::Value {
    info!(config_path = %path.display(), "Validating configuration");

    if !path.exists() {
        return serde_json::json!({
            "valid": true,
            "found": false,
            "config_path": path.display().to_string(),
            "errors": [],
        });
    }

    let errors: Vec<String> = match Config::load(path) {
        Ok(config) => config.validate().iter().map(ToString::to_string).collect(),
        Err(e) => vec![format!("Failed to parse configuration: {e}")],
    };

    serde_json::json!({
        "valid": errors.is_empty(),
        "found": true,
        "config_path": path.display().to_string(),
        "errors": errors,
    })
}
