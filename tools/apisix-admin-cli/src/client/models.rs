use serde::{Deserialize, Serialize};

/// Body of `GET /apisix/admin/import/last`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastImportResponse {
    #[serde(default)]
    pub last_import: Option<String>,
}

/// Body of a successful `POST /apisix/admin/import`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub last_import: Option<String>,
}

impl ImportResponse {
    /// Server message, ignoring empty strings
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Server import timestamp, ignoring empty strings
    pub fn last_import(&self) -> Option<&str> {
        self.last_import.as_deref().filter(|t| !t.is_empty())
    }
}
