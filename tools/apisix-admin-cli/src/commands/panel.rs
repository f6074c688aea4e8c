use crate::client::{ClientFactory, HttpClient};
use crate::config::ContextConfig;
use crate::download::DirectorySink;
use crate::i18n::{Catalog, Translator, keys};
use crate::notify::ConsoleNotifier;
use crate::panel::Panel;
use crate::types::{ConnectionArgs, OutputFormat};
use crate::view::{OutputArgs, PanelView, print_output};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Directory exports are written to: explicit, then the context's, then `.`
pub fn resolve_download_dir(
    out_dir: Option<&Path>,
    context: &ContextConfig,
) -> PathBuf {
    out_dir
        .map(Path::to_path_buf)
        .or_else(|| context.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Message catalog for `context`; built-in strings when no locale file is set
pub async fn load_catalog(context: &ContextConfig) -> Result<Catalog> {
    match &context.locale_file {
        Some(path) => {
            debug!("loading message catalog from {:?}", path);
            Catalog::load(path).await
        }
        None => Ok(Catalog::new()),
    }
}

/// Panel wired to the console, the admin API of `context` and a directory sink
pub async fn build_panel(
    context: &ContextConfig,
    out_dir: Option<&Path>,
) -> Result<Panel<HttpClient>> {
    let api = ClientFactory::create_http_client(context)?;
    let catalog = load_catalog(context).await?;
    let sink = DirectorySink::new(resolve_download_dir(out_dir, context));
    Ok(Panel::new(
        api,
        Arc::new(ConsoleNotifier),
        Arc::new(catalog),
        Arc::new(sink),
    ))
}

pub fn render(panel: &Panel<HttpClient>, format: &OutputFormat) -> Result<()> {
    let view = PanelView::build(panel.state(), panel.translator());
    print_output(&view, format)
}

pub async fn handle_panel_command(
    conn: &ConnectionArgs,
    out: &OutputArgs,
) -> Result<()> {
    let context = conn.with_context().await?;
    handle_panel(&context, &out.output).await
}

pub async fn handle_panel(context: &ContextConfig, format: &OutputFormat) -> Result<()> {
    let mut panel = build_panel(context, None).await?;
    panel.mount().await;
    render(&panel, format)
}

pub async fn handle_last_import_command(conn: &ConnectionArgs) -> Result<()> {
    let context = conn.with_context().await?;
    handle_last_import(&context).await
}

pub async fn handle_last_import(context: &ContextConfig) -> Result<()> {
    let mut panel = build_panel(context, None).await?;
    panel.mount().await;
    match panel.state().last_import.as_deref() {
        Some(date) if !date.is_empty() => println!(
            "{}",
            panel
                .translator()
                .message(&keys::LAST_IMPORT, &[("date", date)])
        ),
        _ => println!("No import recorded"),
    }
    Ok(())
}
