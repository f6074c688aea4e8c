use crate::config::{ContextConfig, ContextManager};
use crate::types::ContextOperation;
use anyhow::Result;

const MASKED_KEY: &str = "********";

/// Handle context management commands
pub async fn handle_context_command(operation: &ContextOperation) -> Result<()> {
    let mut manager = ContextManager::new().await?;
    handle_context_command_with_manager(operation, &mut manager).await
}

/// Handle context management commands with a specific ContextManager (useful for testing)
pub async fn handle_context_command_with_manager(
    operation: &ContextOperation,
    manager: &mut ContextManager,
) -> Result<()> {
    match operation {
        ContextOperation::Set {
            name,
            admin_url,
            admin_key,
            download_dir,
            locale_file,
            timeout_secs,
        } => {
            let update = ContextConfig {
                admin_url: admin_url.clone(),
                admin_key: admin_key.clone(),
                download_dir: download_dir.clone(),
                locale_file: locale_file.clone(),
                timeout_secs: *timeout_secs,
            };
            handle_context_set(name.clone(), update, manager).await
        }
        ContextOperation::Get => handle_context_get(manager),
        ContextOperation::List => handle_context_list(manager),
        ContextOperation::Select { name } => {
            handle_context_select(name.clone(), manager).await
        }
    }
}

async fn handle_context_set(
    name: Option<String>,
    update: ContextConfig,
    manager: &mut ContextManager,
) -> Result<()> {
    manager.set_context(name.clone(), update).await?;

    let context_name =
        name.unwrap_or_else(|| manager.config().current_context.clone());
    println!("ctx:'{}' updated successfully", context_name);

    if let Some(context) = manager.config().get_context(&context_name) {
        println!("Configuration:");
        if let Some(url) = &context.admin_url {
            println!("  adminUrl: '{}'", url);
        }
        if context.admin_key.is_some() {
            println!("  adminKey: '{}'", MASKED_KEY);
        }
        if let Some(dir) = &context.download_dir {
            println!("  downloadDir: '{}'", dir.display());
        }
        if let Some(file) = &context.locale_file {
            println!("  localeFile: '{}'", file.display());
        }
        if let Some(secs) = context.timeout_secs {
            println!("  timeoutSecs: {}", secs);
        }
    }

    Ok(())
}

fn handle_context_get(manager: &ContextManager) -> Result<()> {
    let current_context = &manager.config().current_context;

    if let Some(context) = manager.get_current_context() {
        println!("Current context: {}", current_context);

        let json_output = serde_json::json!({
            "adminUrl": context.admin_url,
            "adminKey": context.admin_key.as_ref().map(|_| MASKED_KEY),
            "downloadDir": context.download_dir,
            "localeFile": context.locale_file,
            "timeoutSecs": context.timeout_secs,
        });

        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else {
        println!("No current context set");
    }

    Ok(())
}

fn handle_context_list(manager: &ContextManager) -> Result<()> {
    let current = &manager.config().current_context;
    for name in manager.config().list_contexts() {
        let marker = if name == current { '*' } else { ' ' };
        println!("{} {}", marker, name);
    }
    Ok(())
}

async fn handle_context_select(
    name: String,
    manager: &mut ContextManager,
) -> Result<()> {
    if manager.config().get_context(&name).is_none() {
        return Err(anyhow::anyhow!("Context '{}' does not exist", name));
    }

    manager.select_context(name.clone()).await?;
    println!("Switched to context '{}'", name);

    Ok(())
}
