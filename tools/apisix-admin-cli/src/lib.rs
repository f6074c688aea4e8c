pub mod client;
mod commands;
pub mod config;
pub mod download;
pub mod i18n;
pub mod notify;
pub mod panel;
pub mod picker;
mod types;
pub mod view;

use std::process;

pub use view::{OutputArgs, PanelView, print_output};
pub use types::{
    ApisixCli, ApisixCommands, ConnectionArgs, ContextOperation, OutputFormat,
};

pub async fn run(cli: ApisixCli) {
    match &cli.command {
        ApisixCommands::Import { file, conn, out } => {
            if let Err(e) = commands::handle_import_command(file, conn, out).await {
                eprintln!("Import command failed: {}", e);
                process::exit(1);
            }
        }
        ApisixCommands::Export { out_dir, conn, out } => {
            if let Err(e) =
                commands::handle_export_command(out_dir.as_deref(), conn, out).await
            {
                eprintln!("Export command failed: {}", e);
                process::exit(1);
            }
        }
        ApisixCommands::LastImport { conn } => {
            if let Err(e) = commands::handle_last_import_command(conn).await {
                eprintln!("Last import command failed: {}", e);
                process::exit(1);
            }
        }
        ApisixCommands::Panel { conn, out } => {
            if let Err(e) = commands::handle_panel_command(conn, out).await {
                eprintln!("Panel command failed: {}", e);
                process::exit(1);
            }
        }
        ApisixCommands::Context { opt } => {
            if let Err(e) = commands::handle_context_command(opt).await {
                eprintln!("Context command failed: {}", e);
                process::exit(1);
            }
        }
    }
}
