//! [`FilePicker`] over the files of a Dioxus file input.
//!
//! The platform dialog is opened by the `input[type=file]` itself; by the time
//! the change event fires the user has chosen. The adapter turns the event's
//! [`FileEngine`] into a pick outcome and reads the bytes back on upload.

use std::sync::Arc;

use client::upload::PDF_MIME;
use client::{FilePicker, PickError, PickOutcome, SelectedFile};
use dioxus::html::FileEngine;

#[derive(Clone)]
pub struct FileEnginePicker {
    engine: Option<Arc<dyn FileEngine>>,
}

impl FileEnginePicker {
    pub fn new(engine: Option<Arc<dyn FileEngine>>) -> Self {
        Self { engine }
    }
}

fn mime_for(name: &str) -> Option<String> {
    name.to_ascii_lowercase()
        .ends_with(".pdf")
        .then(|| PDF_MIME.to_string())
}

impl FilePicker for FileEnginePicker {
    async fn pick(&self, _mime_filter: &str) -> Result<PickOutcome, PickError> {
        let Some(engine) = &self.engine else {
            return Ok(PickOutcome::Empty);
        };
        // An empty list means the dialog was dismissed
        let Some(name) = engine.files().into_iter().next() else {
            return Ok(PickOutcome::Cancelled);
        };
        let size_bytes = engine.file_size(&name).await;
        let display_name = std::path::Path::new(&name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        Ok(PickOutcome::Picked(SelectedFile {
            mime_type: mime_for(&display_name),
            name: display_name,
            uri: name,
            size_bytes,
        }))
    }

    async fn read(&self, file: &SelectedFile) -> Result<Vec<u8>, PickError> {
        let engine = self.engine.as_ref().ok_or_else(|| PickError::Read {
            name: file.name.clone(),
            reason: "no file selected".to_string(),
        })?;
        engine
            .read_file(&file.uri)
            .await
            .ok_or_else(|| PickError::Read {
                name: file.name.clone(),
                reason: "file could not be read".to_string(),
            })
    }
}
