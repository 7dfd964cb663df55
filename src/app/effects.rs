use std::time::Instant;

use crate::app::{App, Message, Model, ToastLevel};
use crate::export::{SAVED_INDICATOR_DURATION, export_html, export_markdown};
use crate::storage::persist_document;

impl App {
    /// Perform the I/O a message implies, after `update` has run.
    ///
    /// Any document change is mirrored to storage. Failures are reported as
    /// toasts and editing carries on.
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::ExportMarkdown => {
                let result = export_markdown(&self.export_dir, &model.buffer.text());
                Self::finish_export(model, result);
            }
            Message::ExportHtml => {
                let result = export_html(&self.export_dir, &model.buffer.text());
                Self::finish_export(model, result);
            }
            _ => {}
        }

        if model.needs_persist() {
            self.persist(model);
        }
    }

    fn persist(&mut self, model: &mut Model) {
        // A failed write is not retried until the next change.
        model.persisted_revision = model.revision;
        if let Err(err) = persist_document(self.storage.as_mut(), &model.buffer.text()) {
            tracing::warn!(error = %err, "could not persist document");
            model.show_toast(ToastLevel::Warning, format!("Not saved: {err}"));
        }
    }

    fn finish_export(
        model: &mut Model,
        result: Result<std::path::PathBuf, crate::export::ExportError>,
    ) {
        match result {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "export complete");
                model.saved_until = Some(Instant::now() + SAVED_INDICATOR_DURATION);
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }
}
