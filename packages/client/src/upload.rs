//! # Admin document upload
//!
//! [`UploadFlow`] is a two-stage machine sharing one selected-file slot:
//!
//! 1. **Pick**: ask the [`FilePicker`] for a PDF. A pick replaces the previous
//!    selection; cancellation and picker errors only set the status message.
//! 2. **Upload**: needs a selection. Stores the bytes under a fresh
//!    [`storage_key`] with overwrite disabled, then asks for the public URL.
//!
//! The upload ends in one of three tiers:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | [`UploadOutcome::Published`] | Stored and publicly reachable; URL remembered under `uploadedUrl` |
//! | [`UploadOutcome::StoredWithoutUrl`] | Stored, but no public URL could be obtained |
//! | failure | Nothing stored; message kept for display |

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use api::{BackendError, ObjectStorage, UploadRequest, Url};
use store::{keys, KeyValueStore};

use crate::action::{AsyncAction, AsyncStatus, Ticket};
use crate::errors::{classify, classify_backend, user_alert, ErrorKind, UserAlert};
use crate::navigation::Screen;

pub const PDF_MIME: &str = "application/pdf";

const DEFAULT_FILE_STEM: &str = "invoice";

/// A document chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Handle the picker can read the bytes back from.
    pub uri: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
}

impl SelectedFile {
    pub fn size_label(&self) -> Option<String> {
        self.size_bytes
            .map(|bytes| format!("Size: {:.2} KB", bytes as f64 / 1024.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(SelectedFile),
    Cancelled,
    /// The picker returned without any file.
    Empty,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PickError {
    #[error("{0}")]
    Picker(String),
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

/// OS file picker.
pub trait FilePicker {
    fn pick(&self, mime_filter: &str) -> impl Future<Output = Result<PickOutcome, PickError>>;

    fn read(&self, file: &SelectedFile) -> impl Future<Output = Result<Vec<u8>, PickError>>;
}

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Published { key: String, url: Url },
    StoredWithoutUrl { key: String },
}

impl UploadOutcome {
    pub fn key(&self) -> &str {
        match self {
            UploadOutcome::Published { key, .. } | UploadOutcome::StoredWithoutUrl { key } => key,
        }
    }

    pub fn public_url(&self) -> Option<&Url> {
        match self {
            UploadOutcome::Published { url, .. } => Some(url),
            UploadOutcome::StoredWithoutUrl { .. } => None,
        }
    }

    fn status_message(&self) -> String {
        match self {
            UploadOutcome::Published { url, .. } => {
                format!("Upload complete!\nPublic URL: {url}")
            }
            UploadOutcome::StoredWithoutUrl { .. } => {
                "File uploaded, but could not retrieve public URL. Check bucket permissions."
                    .to_string()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Read(#[from] PickError),
    #[error(transparent)]
    Storage(#[from] BackendError),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Read(e) => e.to_string(),
            UploadError::Storage(e) => e.user_message(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Read(e) => classify(&e.to_string()),
            UploadError::Storage(e) => classify_backend(e),
        }
    }
}

/// Hands out strictly increasing millisecond timestamps.
#[derive(Debug, Default)]
pub struct KeyClock {
    last: AtomicU64,
}

impl KeyClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        let now = now_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(previous + 1);
            match self
                .last
                .compare_exchange_weak(previous, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => previous = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// `<timestamp>_<name>`, keeping only ASCII letters, digits and dots from the
/// name and defaulting the extension to `.pdf`.
pub fn storage_key(file_name: &str, timestamp: u64) -> String {
    let trimmed = file_name.trim();
    let base = if trimmed.is_empty() {
        DEFAULT_FILE_STEM
    } else {
        trimmed
    };
    let mut name: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect();
    let has_extension = matches!(
        name.rsplit_once('.'),
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty()
    );
    if !has_extension {
        name.push_str(".pdf");
    }
    format!("{timestamp}_{name}")
}

/// Everything the upload call needs, captured when the upload starts.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub ticket: Ticket,
    pub file: SelectedFile,
    pub key: String,
}

impl UploadJob {
    pub fn content_type(&self) -> &str {
        self.file.mime_type.as_deref().unwrap_or(PDF_MIME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBlocked {
    Busy,
    NoFile,
}

#[derive(Debug, Default)]
pub struct UploadFlow {
    selected: Option<SelectedFile>,
    message: Option<String>,
    pick: AsyncAction<()>,
    upload: AsyncAction<UploadOutcome>,
    alert: Option<UserAlert>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn alert(&self) -> Option<&UserAlert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn upload_status(&self) -> AsyncStatus {
        self.upload.status()
    }

    pub fn outcome(&self) -> Option<&UploadOutcome> {
        self.upload.result()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload.is_pending()
    }

    pub fn can_pick(&self) -> bool {
        !self.pick.is_pending() && !self.upload.is_pending()
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && self.can_pick()
    }

    /// Screen showing the uploaded document, once there is a public URL.
    pub fn view_document_target(&self) -> Option<Screen> {
        self.outcome()
            .and_then(UploadOutcome::public_url)
            .map(|url| Screen::view_document(url.as_str()))
    }

    pub fn begin_pick(&mut self) -> Option<Ticket> {
        if !self.can_pick() {
            return None;
        }
        self.message = None;
        self.upload.reset();
        self.pick.start()
    }

    pub fn finish_pick(&mut self, ticket: &Ticket, outcome: Result<PickOutcome, PickError>) {
        let message = match outcome {
            Ok(PickOutcome::Picked(file)) => {
                if self.pick.resolve_success(ticket, ()) {
                    tracing::info!(name = %file.name, "document selected");
                    self.selected = Some(file);
                }
                return;
            }
            Ok(PickOutcome::Cancelled) => "Document selection cancelled.".to_string(),
            Ok(PickOutcome::Empty) => "Failed to select document or no assets found.".to_string(),
            Err(e) => {
                tracing::error!("document picker failed: {e}");
                format!("Error picking document: {e}")
            }
        };
        if self.pick.resolve_failure(ticket, message.clone()) {
            self.message = Some(message);
        }
    }

    /// Claim the selected file for upload. `clock` names the stored object.
    pub fn begin_upload(&mut self, clock: &KeyClock) -> Result<UploadJob, UploadBlocked> {
        if self.upload.is_pending() || self.pick.is_pending() {
            return Err(UploadBlocked::Busy);
        }
        let Some(file) = self.selected.clone() else {
            self.message = Some("Please select a valid PDF document first.".to_string());
            return Err(UploadBlocked::NoFile);
        };
        let ticket = self.upload.start().ok_or(UploadBlocked::Busy)?;
        let key = storage_key(&file.name, clock.next());
        self.message = Some("Uploading...".to_string());
        self.alert = None;
        Ok(UploadJob { ticket, file, key })
    }

    pub fn finish_upload(&mut self, ticket: &Ticket, outcome: Result<UploadOutcome, UploadError>) {
        match outcome {
            Ok(outcome) => {
                let message = outcome.status_message();
                if self.upload.resolve_success(ticket, outcome) {
                    self.message = Some(message);
                }
            }
            Err(e) => {
                let text = e.user_message();
                if self.upload.resolve_failure(ticket, text.clone()) {
                    self.message = Some(format!("Upload Failed: {text}"));
                    self.alert = Some(user_alert(e.kind(), &text));
                }
            }
        }
    }

    /// Pick through `picker`, recording the result.
    #[cfg(test)]
    pub async fn pick_document<P: FilePicker>(&mut self, picker: &P) -> bool {
        let Some(ticket) = self.begin_pick() else {
            return false;
        };
        let outcome = picker.pick(PDF_MIME).await;
        self.finish_pick(&ticket, outcome);
        true
    }

    /// Upload the selected document and remember its public URL.
    #[cfg(test)]
    pub async fn upload_selected<S, P, K>(
        &mut self,
        target: &UploadTarget<'_, S, P, K>,
        clock: &KeyClock,
    ) -> Result<(), UploadBlocked>
    where
        S: ObjectStorage,
        P: FilePicker,
        K: KeyValueStore,
    {
        let job = self.begin_upload(clock)?;
        let outcome = target.run(&job).await;
        self.finish_upload(&job.ticket, outcome);
        Ok(())
    }
}

/// Collaborators an upload talks to.
pub struct UploadTarget<'a, S, P, K> {
    pub storage: &'a S,
    pub picker: &'a P,
    pub kv: &'a K,
    pub bucket: &'a str,
    pub access_token: Option<String>,
}

impl<S, P, K> UploadTarget<'_, S, P, K>
where
    S: ObjectStorage,
    P: FilePicker,
    K: KeyValueStore,
{
    /// Read, store, resolve the public URL and remember it.
    pub async fn run(&self, job: &UploadJob) -> Result<UploadOutcome, UploadError> {
        let bytes = self.picker.read(&job.file).await?;
        tracing::info!(key = %job.key, size = bytes.len(), "uploading document");

        let stored = self
            .storage
            .upload(UploadRequest {
                bucket: self.bucket.to_string(),
                key: job.key.clone(),
                bytes,
                content_type: job.content_type().to_string(),
                overwrite: false,
                access_token: self.access_token.clone(),
            })
            .await?;
        tracing::debug!(path = %stored.path, "document stored");

        let url = match self.storage.public_url(self.bucket, &job.key).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                tracing::warn!(key = %job.key, "no public url for stored document");
                return Ok(UploadOutcome::StoredWithoutUrl {
                    key: job.key.clone(),
                });
            }
            Err(e) => {
                tracing::warn!(key = %job.key, "public url lookup failed: {e}");
                return Ok(UploadOutcome::StoredWithoutUrl {
                    key: job.key.clone(),
                });
            }
        };

        if let Err(e) = store::kv::set_json(self.kv, keys::UPLOADED_URL, url.as_str()).await {
            tracing::warn!("could not remember uploaded url: {e}");
        }
        Ok(UploadOutcome::Published {
            key: job.key.clone(),
            url,
        })
    }
}

/// URL of the last published upload, if any.
pub async fn last_uploaded_url<K: KeyValueStore>(kv: &K) -> Option<String> {
    let raw = match kv.get(keys::UPLOADED_URL).await {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("could not read uploaded url: {e}");
            return None;
        }
    };
    // Written as JSON; tolerate a bare string
    let url = serde_json::from_str::<String>(&raw).unwrap_or(raw);
    (!url.trim().is_empty()).then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pdf, FakePicker, FakeStorage};
    use store::MemoryStore;

    fn target<'a>(
        storage: &'a FakeStorage,
        picker: &'a FakePicker,
        kv: &'a MemoryStore,
    ) -> UploadTarget<'a, FakeStorage, FakePicker, MemoryStore> {
        UploadTarget {
            storage,
            picker,
            kv,
            bucket: "pdf",
            access_token: None,
        }
    }

    fn is_key(key: &str, name: &str) -> bool {
        key.split_once('_').is_some_and(|(ts, rest)| {
            !ts.is_empty() && ts.chars().all(|c| c.is_ascii_digit()) && rest == name
        })
    }

    #[test]
    fn test_storage_key_sanitizes_name() {
        let key = storage_key("My Invoice #1.pdf", 1_700_000_000_000);
        assert_eq!(key, "1700000000000_My_Invoice__1.pdf");
        assert!(is_key(&storage_key("My Invoice #1.pdf", 42), "My_Invoice__1.pdf"));
    }

    #[test]
    fn test_storage_key_defaults() {
        assert_eq!(storage_key("scan", 7), "7_scan.pdf");
        assert_eq!(storage_key("", 7), "7_invoice.pdf");
        assert_eq!(storage_key("  ", 7), "7_invoice.pdf");
        assert_eq!(storage_key("bill.", 7), "7_bill..pdf");
        assert_eq!(storage_key("facture été.PDF", 7), "7_facture__t_.PDF");
    }

    #[test]
    fn test_key_clock_is_strictly_increasing() {
        let clock = KeyClock::new();
        let mut previous = clock.next();
        for _ in 0..1000 {
            let next = clock.next();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_size_label() {
        let mut file = pdf("a.pdf");
        file.size_bytes = Some(2048);
        assert_eq!(file.size_label().as_deref(), Some("Size: 2.00 KB"));
        file.size_bytes = None;
        assert!(file.size_label().is_none());
    }

    #[tokio::test]
    async fn test_upload_without_file_never_reaches_storage() {
        let storage = FakeStorage::new();
        let picker = FakePicker::new(vec![Ok(PickOutcome::Cancelled)]);
        let kv = MemoryStore::new();
        let mut flow = UploadFlow::new();

        assert!(!flow.can_upload());
        let blocked = flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new()).await;
        assert_eq!(blocked, Err(UploadBlocked::NoFile));
        assert_eq!(flow.message(), Some("Please select a valid PDF document first."));

        flow.pick_document(&picker).await;
        assert_eq!(flow.message(), Some("Document selection cancelled."));
        assert!(!flow.can_upload());

        let blocked = flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new()).await;
        assert_eq!(blocked, Err(UploadBlocked::NoFile));
        assert!(storage.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_pick_failures_keep_previous_selection() {
        let picker = FakePicker::new(vec![
            Ok(PickOutcome::Picked(pdf("first.pdf"))),
            Ok(PickOutcome::Empty),
            Err(PickError::Picker("permission revoked".into())),
        ]);
        let mut flow = UploadFlow::new();

        flow.pick_document(&picker).await;
        assert_eq!(flow.selected().unwrap().name, "first.pdf");
        assert!(flow.message().is_none());

        flow.pick_document(&picker).await;
        assert_eq!(
            flow.message(),
            Some("Failed to select document or no assets found.")
        );
        flow.pick_document(&picker).await;
        assert_eq!(
            flow.message(),
            Some("Error picking document: permission revoked")
        );
        assert_eq!(flow.selected().unwrap().name, "first.pdf");
        assert!(flow.can_upload());
    }

    #[tokio::test]
    async fn test_pick_upload_view_document() {
        let storage = FakeStorage::new();
        let picker = FakePicker::new(vec![Ok(PickOutcome::Picked(pdf("My Invoice #1.pdf")))]);
        let kv = MemoryStore::new();
        let mut flow = UploadFlow::new();

        flow.pick_document(&picker).await;
        assert!(flow.can_upload());
        assert!(flow.view_document_target().is_none());

        flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new())
            .await
            .unwrap();

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert!(!uploads[0].overwrite);
        assert_eq!(uploads[0].content_type, PDF_MIME);
        assert!(is_key(&uploads[0].key, "My_Invoice__1.pdf"));

        let url = flow.outcome().and_then(UploadOutcome::public_url).unwrap().clone();
        assert_eq!(
            flow.message().unwrap(),
            format!("Upload complete!\nPublic URL: {url}")
        );
        assert_eq!(
            flow.view_document_target(),
            Some(Screen::view_document(url.as_str()))
        );
        assert_eq!(last_uploaded_url(&kv).await.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_missing_public_url_is_partial_success() {
        let storage = FakeStorage::new().without_public_urls();
        let picker = FakePicker::new(vec![Ok(PickOutcome::Picked(pdf("a.pdf")))]);
        let kv = MemoryStore::new();
        let mut flow = UploadFlow::new();
        flow.pick_document(&picker).await;

        flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new())
            .await
            .unwrap();

        assert_eq!(flow.upload_status(), AsyncStatus::Success);
        assert!(matches!(
            flow.outcome(),
            Some(UploadOutcome::StoredWithoutUrl { .. })
        ));
        assert_eq!(
            flow.message(),
            Some("File uploaded, but could not retrieve public URL. Check bucket permissions.")
        );
        assert!(flow.view_document_target().is_none());
        assert!(last_uploaded_url(&kv).await.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let storage = FakeStorage::new().failing("new row violates row-level security policy");
        let picker = FakePicker::new(vec![Ok(PickOutcome::Picked(pdf("a.pdf")))]);
        let kv = MemoryStore::new();
        let mut flow = UploadFlow::new();
        flow.pick_document(&picker).await;

        flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new())
            .await
            .unwrap();

        assert_eq!(flow.upload_status(), AsyncStatus::Failure);
        assert_eq!(
            flow.message(),
            Some("Upload Failed: new row violates row-level security policy")
        );
        assert!(flow.alert().unwrap().body.starts_with("Permission denied"));
        // Selection survives for a retry
        assert!(flow.can_upload());
    }

    #[test]
    fn test_upload_error_kind() {
        let denied = UploadError::Storage(BackendError::Api {
            status: 403,
            message: "new row violates row-level security policy".into(),
        });
        assert_eq!(denied.kind(), ErrorKind::Permission);
        let mime = UploadError::Storage(BackendError::Api {
            status: 415,
            message: "mime type text/plain is not supported".into(),
        });
        assert_eq!(mime.kind(), ErrorKind::InvalidFileType);
        let read = UploadError::Read(PickError::Read {
            name: "a.pdf".into(),
            reason: "gone".into(),
        });
        assert_eq!(read.kind(), ErrorKind::Generic);
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_before_storage() {
        let storage = FakeStorage::new();
        let picker = FakePicker::new(vec![Ok(PickOutcome::Picked(pdf("gone.pdf")))]).unreadable();
        let kv = MemoryStore::new();
        let mut flow = UploadFlow::new();
        flow.pick_document(&picker).await;

        flow.upload_selected(&target(&storage, &picker, &kv), &KeyClock::new())
            .await
            .unwrap();
        assert_eq!(flow.upload_status(), AsyncStatus::Failure);
        assert!(storage.uploads().is_empty());
    }

    #[test]
    fn test_upload_is_exclusive() {
        let mut flow = UploadFlow::new();
        let pick = flow.begin_pick().unwrap();
        flow.finish_pick(&pick, Ok(PickOutcome::Picked(pdf("a.pdf"))));

        let clock = KeyClock::new();
        let job = flow.begin_upload(&clock).unwrap();
        assert_eq!(flow.message(), Some("Uploading..."));
        assert!(!flow.can_upload());
        assert!(flow.begin_pick().is_none());
        assert_eq!(flow.begin_upload(&clock).unwrap_err(), UploadBlocked::Busy);

        flow.finish_upload(
            &job.ticket,
            Ok(UploadOutcome::StoredWithoutUrl { key: job.key.clone() }),
        );
        assert!(flow.can_upload());
    }

    #[tokio::test]
    async fn test_last_uploaded_url_accepts_bare_string() {
        let kv = MemoryStore::new();
        assert!(last_uploaded_url(&kv).await.is_none());
        kv.set(keys::UPLOADED_URL, "https://cdn.test/a.pdf").await.unwrap();
        assert_eq!(
            last_uploaded_url(&kv).await.as_deref(),
            Some("https://cdn.test/a.pdf")
        );
    }
}
