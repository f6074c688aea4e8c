//! The configuration import/export panel.
//!
//! [`Panel`] owns the display state and drives the three flows against an
//! [`AdminApi`]: the best-effort last-import fetch, the import flow and the
//! export flow. Import and export never return errors; every failure ends up
//! in the state and in a notification.

mod state;

pub use state::*;

use crate::client::{AdminApi, ClientError, ImportResponse};
use crate::download::DownloadSink;
use crate::i18n::{Message, Translator, keys};
use crate::notify::{Icon, Notification, Notifier, Severity};
use crate::picker::FilePicker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// File name used for an export taken at `epoch_ms`
pub fn export_filename(epoch_ms: i64) -> String {
    format!("apisix-config_{epoch_ms}.yaml")
}

/// Text of an uploaded file: a leading UTF-8 BOM is dropped and invalid
/// sequences become U+FFFD
pub fn decode_text(raw: &[u8]) -> String {
    let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

pub struct Panel<A: AdminApi> {
    api: A,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
    sink: Arc<dyn DownloadSink>,
    clock: Clock,
    last_stamp: i64,
    state: PanelState,
}

impl<A: AdminApi> Panel<A> {
    pub fn new(
        api: A,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
        sink: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            api,
            notifier,
            translator,
            sink,
            clock: Box::new(|| chrono::Utc::now().timestamp_millis()),
            last_stamp: 0,
            state: PanelState::default(),
        }
    }

    /// Replace the millisecond wall clock used for export file names
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> i64 + Send + Sync + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// First display of the panel
    pub async fn mount(&mut self) {
        self.fetch_last_import().await;
    }

    /// Swap the admin credential and refresh what depends on it
    pub async fn set_admin_key(&mut self, admin_key: String) {
        self.api.set_admin_key(admin_key);
        self.fetch_last_import().await;
    }

    /// Refresh the last-import readout; failures are logged and ignored
    pub async fn fetch_last_import(&mut self) {
        match self.api.last_import().await {
            Ok(resp) => {
                debug!("last import: {:?}", resp.last_import);
                self.state.last_import = resp.last_import;
            }
            Err(e) => debug!("failed to fetch last import: {e}"),
        }
    }

    /// Open the chooser and import whatever gets selected
    pub async fn begin_import(&mut self, picker: &mut dyn FilePicker) -> ImportOutcome {
        self.state.import_phase = ImportPhase::Picking;
        picker.clear();
        match picker.choose() {
            Ok(Some(path)) => self.import_file(&path).await,
            Ok(None) => {
                debug!("import cancelled");
                self.state.import_phase = ImportPhase::Idle;
                ImportOutcome::Cancelled
            }
            Err(e) => {
                self.start_import();
                let message = self.non_empty_or(e.to_string(), &keys::IMPORT_FAILED_MSG);
                self.state.loading = false;
                self.finish_import(Err(message))
            }
        }
    }

    /// Read `path` and submit it to the import endpoint
    pub async fn import_file(&mut self, path: &Path) -> ImportOutcome {
        self.start_import();
        info!("importing {:?}", path);
        let result = self.submit_import(path).await;
        self.state.loading = false;
        self.finish_import(result)
    }

    fn start_import(&mut self) {
        self.state.loading = true;
        self.state.error_message = None;
        self.state.import_result = None;
    }

    async fn submit_import(&mut self, path: &Path) -> Result<ImportResponse, String> {
        self.state.import_phase = ImportPhase::Reading;
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| self.non_empty_or(e.to_string(), &keys::IMPORT_FAILED_MSG))?;
        let content = decode_text(&raw);

        self.state.import_phase = ImportPhase::Submitting;
        self.api
            .import_yaml(content)
            .await
            .map_err(|e| self.import_failure(e))
    }

    fn finish_import(&mut self, result: Result<ImportResponse, String>) -> ImportOutcome {
        match result {
            Ok(resp) => {
                let message = resp
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.t(&keys::IMPORT_SUCCESS_MSG, &[]));
                if let Some(ts) = resp.last_import() {
                    self.state.last_import = Some(ts.to_string());
                }
                info!("import succeeded: {message}");
                self.state.import_result = Some(message.clone());
                self.state.import_phase = ImportPhase::Succeeded;
                self.notify(
                    &keys::IMPORT_SUCCESS_TITLE,
                    message.clone(),
                    Severity::Success,
                    Some(Icon::Upload),
                );
                ImportOutcome::Succeeded { message }
            }
            Err(message) => {
                warn!("import failed: {message}");
                self.state.error_message = Some(message.clone());
                self.state.import_phase = ImportPhase::Failed;
                self.notify(
                    &keys::IMPORT_FAILED_TITLE,
                    message.clone(),
                    Severity::Error,
                    None,
                );
                ImportOutcome::Failed { message }
            }
        }
    }

    fn import_failure(&self, err: ClientError) -> String {
        match err {
            ClientError::ApiError { status, message } if message.is_empty() => {
                format!("Import failed: {status}")
            }
            ClientError::ApiError { message, .. } => message,
            other => self.non_empty_or(other.to_string(), &keys::IMPORT_FAILED_MSG),
        }
    }

    /// Download the current configuration through the sink
    pub async fn export(&mut self) -> ExportOutcome {
        self.state.loading = true;
        let result = self.save_export().await;
        self.state.loading = false;

        match result {
            Ok((filename, path)) => {
                info!("exported configuration to {:?}", path);
                let message = self.t(&keys::EXPORT_FILE, &[("filename", filename.as_str())]);
                self.notify(
                    &keys::EXPORT_SUCCESS_TITLE,
                    message,
                    Severity::Info,
                    Some(Icon::Download),
                );
                ExportOutcome::Saved { filename, path }
            }
            Err(message) => {
                warn!("export failed: {message}");
                self.notify(
                    &keys::EXPORT_FAILED_TITLE,
                    message.clone(),
                    Severity::Error,
                    None,
                );
                ExportOutcome::Failed { message }
            }
        }
    }

    async fn save_export(&mut self) -> Result<(String, PathBuf), String> {
        let bytes = self.api.export().await.map_err(|e| match e {
            ClientError::ApiError { status, .. } => format!("Export failed: {status}"),
            other => self.non_empty_or(other.to_string(), &keys::EXPORT_FAILED_MSG),
        })?;

        let requested = export_filename(self.next_stamp());
        let sink = self.sink.clone();
        let path = tokio::task::spawn_blocking(move || sink.save(&requested, &bytes))
            .await
            .map_err(|e| e.to_string())
            .and_then(|saved| saved.map_err(|e| e.to_string()))
            .map_err(|e| self.non_empty_or(e, &keys::EXPORT_FAILED_MSG))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok((filename, path))
    }

    /// Current epoch milliseconds, never lower than a previous call
    fn next_stamp(&mut self) -> i64 {
        let now = (self.clock)();
        self.last_stamp = self.last_stamp.max(now);
        self.last_stamp
    }

    fn t(&self, msg: &Message, vars: &[(&str, &str)]) -> String {
        self.translator.message(msg, vars)
    }

    fn non_empty_or(&self, message: String, fallback: &Message) -> String {
        if message.is_empty() {
            self.t(fallback, &[])
        } else {
            message
        }
    }

    fn notify(
        &self,
        title: &Message,
        message: String,
        severity: Severity,
        icon: Option<Icon>,
    ) {
        self.notifier.show(Notification {
            title: self.t(title, &[]),
            message,
            severity,
            icon,
        });
    }
}
