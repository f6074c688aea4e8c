use super::panel::{build_panel, render};
use crate::config::ContextConfig;
use crate::panel::{ExportOutcome, ImportOutcome};
use crate::picker::PathPicker;
use crate::types::{ConnectionArgs, OutputFormat};
use crate::view::OutputArgs;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub async fn handle_import_command(
    file: &PathBuf,
    conn: &ConnectionArgs,
    out: &OutputArgs,
) -> Result<()> {
    let context = conn.with_context().await?;
    handle_import(file, &context, &out.output).await
}

/// Import `file` and print the resulting panel
pub async fn handle_import(
    file: &Path,
    context: &ContextConfig,
    format: &OutputFormat,
) -> Result<()> {
    let mut panel = build_panel(context, None).await?;
    panel.mount().await;

    let mut picker = PathPicker::new(Some(file.to_path_buf()));
    let outcome = panel.begin_import(&mut picker).await;
    render(&panel, format)?;

    match outcome {
        ImportOutcome::Failed { message } => Err(anyhow::anyhow!(message)),
        ImportOutcome::Cancelled | ImportOutcome::Succeeded { .. } => Ok(()),
    }
}

pub async fn handle_export_command(
    out_dir: Option<&Path>,
    conn: &ConnectionArgs,
    out: &OutputArgs,
) -> Result<()> {
    let context = conn.with_context().await?;
    handle_export(out_dir, &context, &out.output).await.map(|_| ())
}

/// Export into `out_dir` and print the panel; returns the written file
pub async fn handle_export(
    out_dir: Option<&Path>,
    context: &ContextConfig,
    format: &OutputFormat,
) -> Result<PathBuf> {
    let mut panel = build_panel(context, out_dir).await?;
    panel.mount().await;

    let outcome = panel.export().await;
    render(&panel, format)?;

    match outcome {
        ExportOutcome::Saved { path, .. } => Ok(path),
        ExportOutcome::Failed { message } => Err(anyhow::anyhow!(message)),
    }
}
