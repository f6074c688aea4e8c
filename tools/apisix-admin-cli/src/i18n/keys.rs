/// A catalog key together with its English default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub default: &'static str,
}

const fn msg(key: &'static str, default: &'static str) -> Message {
    Message { key, default }
}

pub const PAGE_TITLE: Message =
    msg("importExport.sources.importExport", "Import / Export");
pub const CONFIG_MANAGEMENT: Message = msg(
    "importExport.titles.configManagement",
    "Configuration Management",
);
pub const DESCRIPTION: Message = msg(
    "importExport.descriptions.importExport",
    "Use these tools to import or export your APISIX configuration.",
);
pub const LAST_IMPORT: Message =
    msg("importExport.labels.lastImport", "Last import: {{date}}");

pub const ACTION_IMPORT: Message =
    msg("importExport.actions.import", "Import Configuration");
pub const ACTION_EXPORT: Message =
    msg("importExport.actions.export", "Export Configuration");

pub const IMPORT_COMPLETED: Message =
    msg("importExport.titles.importCompleted", "Import completed");
pub const IMPORT_SUCCESS_TITLE: Message =
    msg("importExport.titles.importSuccess", "Import successful");
pub const IMPORT_FAILED_TITLE: Message =
    msg("importExport.titles.importFailed", "Import failed");
pub const IMPORT_SUCCESS_MSG: Message = msg(
    "importExport.messages.importSuccess",
    "Configuration imported successfully.",
);
pub const IMPORT_FAILED_MSG: Message = msg(
    "importExport.errors.importFailed",
    "Failed to import configuration",
);

pub const EXPORT_SUCCESS_TITLE: Message =
    msg("importExport.titles.exportSuccess", "Export successful");
pub const EXPORT_FILE: Message = msg(
    "importExport.messages.exportFile",
    "Configuration exported as {{filename}}",
);
pub const EXPORT_FAILED_TITLE: Message =
    msg("importExport.titles.exportFailed", "Export failed");
pub const EXPORT_FAILED_MSG: Message = msg(
    "importExport.errors.exportFailed",
    "Failed to export configuration",
);
