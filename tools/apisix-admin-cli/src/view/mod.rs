use crate::i18n::{Translator, keys};
use crate::notify::Severity;
use crate::panel::PanelState;
use serde::Serialize;

// Re-export OutputFormat for convenience
pub use crate::types::OutputFormat;

/// Rendered form of the panel: what an operator sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub title: String,
    pub heading: String,
    pub description: String,
    pub last_import: Option<String>,
    pub buttons: Vec<ButtonView>,
    pub alerts: Vec<AlertView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl PanelView {
    pub fn build(state: &PanelState, t: &dyn Translator) -> Self {
        let disabled = !state.actions_enabled();
        let buttons = vec![
            ButtonView {
                label: t.message(&keys::ACTION_IMPORT, &[]),
                disabled,
                busy: state.loading,
            },
            ButtonView {
                label: t.message(&keys::ACTION_EXPORT, &[]),
                disabled,
                busy: false,
            },
        ];

        let mut alerts = Vec::new();
        if let Some(result) = &state.import_result {
            alerts.push(AlertView {
                title: t.message(&keys::IMPORT_COMPLETED, &[]),
                message: result.clone(),
                severity: Severity::Success,
            });
        }
        if let Some(error) = &state.error_message {
            alerts.push(AlertView {
                title: t.message(&keys::IMPORT_FAILED_TITLE, &[]),
                message: error.clone(),
                severity: Severity::Error,
            });
        }

        Self {
            title: t.message(&keys::PAGE_TITLE, &[]),
            heading: t.message(&keys::CONFIG_MANAGEMENT, &[]),
            description: t.message(&keys::DESCRIPTION, &[]),
            last_import: state
                .last_import
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|date| t.message(&keys::LAST_IMPORT, &[("date", date)])),
            buttons,
            alerts,
        }
    }
}

/// Output formatting interface
pub trait Formatter {
    fn format(&self, view: &PanelView) -> anyhow::Result<String>;
}

pub struct JsonFormatter;
pub struct YamlFormatter;
pub struct TextFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, view: &PanelView) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, view: &PanelView) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(view)?)
    }
}

impl Formatter for TextFormatter {
    fn format(&self, view: &PanelView) -> anyhow::Result<String> {
        let mut out = String::new();
        out.push_str(&format!("{}\n", view.title));
        out.push_str(&format!("{}\n\n", "=".repeat(view.title.chars().count())));
        out.push_str(&format!("{}\n", view.heading));
        out.push_str(&format!("{}\n", view.description));
        if let Some(last) = &view.last_import {
            out.push_str(&format!("{}\n", last));
        }
        out.push_str(&format!("{}\n", "-".repeat(40)));

        let buttons: Vec<String> = view
            .buttons
            .iter()
            .map(|b| {
                let mut label = format!("[ {} ]", b.label);
                if b.busy {
                    label.push_str(" ...");
                }
                if b.disabled {
                    label.push_str(" (disabled)");
                }
                label
            })
            .collect();
        out.push_str(&format!("{}\n", buttons.join("  ")));

        for alert in &view.alerts {
            let marker = match alert.severity {
                Severity::Error => '!',
                _ => '+',
            };
            out.push_str(&format!("\n{} {}\n  {}\n", marker, alert.title, alert.message));
        }
        Ok(out)
    }
}

/// Get formatter for the specified output format
pub fn get_formatter(format: &OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Text => Box::new(TextFormatter),
    }
}

/// Format and print the panel in the specified format
pub fn print_output(view: &PanelView, format: &OutputFormat) -> anyhow::Result<()> {
    let formatter = get_formatter(format);
    let output = formatter.format(view)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Global output arguments that can be added to any command
#[derive(clap::Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn state() -> PanelState {
        PanelState {
            import_result: Some("ok".to_string()),
            last_import: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn view_shows_readout_and_success_alert() {
        let view = PanelView::build(&state(), &Catalog::new());
        assert_eq!(view.title, "Import / Export");
        assert_eq!(
            view.last_import.as_deref(),
            Some("Last import: 2024-01-01T00:00:00Z")
        );
        assert_eq!(view.alerts.len(), 1);
        assert_eq!(view.alerts[0].title, "Import completed");
        assert!(view.buttons.iter().all(|b| !b.disabled));
    }

    #[test]
    fn loading_disables_both_buttons() {
        let state = PanelState {
            loading: true,
            ..Default::default()
        };
        let view = PanelView::build(&state, &Catalog::new());
        assert!(view.buttons.iter().all(|b| b.disabled));
        assert!(view.buttons[0].busy);
        assert!(view.last_import.is_none());
        assert!(view.alerts.is_empty());
    }

    #[test]
    fn text_output_contains_every_section() {
        let mut s = state();
        s.error_message = Some("bad yaml".to_string());
        let view = PanelView::build(&s, &Catalog::new());
        let text = TextFormatter.format(&view).unwrap();

        assert!(text.starts_with("Import / Export\n===============\n"));
        assert!(text.contains("Configuration Management"));
        assert!(text.contains("Last import: 2024-01-01T00:00:00Z"));
        assert!(text.contains("[ Import Configuration ]  [ Export Configuration ]"));
        assert!(text.contains("+ Import completed\n  ok"));
        assert!(text.contains("! Import failed\n  bad yaml"));
    }

    #[test]
    fn json_output_is_structured() {
        let view = PanelView::build(&state(), &Catalog::new());
        let json = JsonFormatter.format(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["alerts"][0]["severity"], "success");
        assert_eq!(value["buttons"][1]["label"], "Export Configuration");

        let yaml = YamlFormatter.format(&view).unwrap();
        assert!(yaml.contains("Import / Export"));
    }
}
