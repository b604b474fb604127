//! Embedded document viewer.

use api::Url;

pub const NO_DOCUMENT_MESSAGE: &str = "No document URL provided.";

/// `<base>?embedded=true&url=<document_url>` with the document URL
/// percent-encoded as a single component.
pub fn viewer_url(base: &str, document_url: &str) -> Result<Url, url::ParseError> {
    let base = Url::parse(base)?;
    let mut raw = base.to_string();
    raw.push(if base.query().is_some() { '&' } else { '?' });
    raw.push_str("embedded=true&url=");
    raw.push_str(&urlencoding::encode(document_url));
    Url::parse(&raw)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    /// Nothing to show; the message replaces the embedded page.
    Empty(String),
    Loading,
    Loaded,
    Failed(String),
}

/// What the viewer screen shows for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentViewer {
    source: Option<Url>,
    state: ViewerState,
}

impl DocumentViewer {
    /// `message` overrides the empty-state text when no URL is given.
    pub fn open(base: &str, document_url: Option<&str>, message: Option<&str>) -> Self {
        let document_url = document_url.map(str::trim).filter(|url| !url.is_empty());
        let Some(document_url) = document_url else {
            let message = message.unwrap_or(NO_DOCUMENT_MESSAGE).to_string();
            return Self {
                source: None,
                state: ViewerState::Empty(message),
            };
        };
        match viewer_url(base, document_url) {
            Ok(url) => {
                tracing::debug!(%url, "opening document viewer");
                Self {
                    source: Some(url),
                    state: ViewerState::Loading,
                }
            }
            Err(e) => {
                tracing::error!("viewer base url is invalid: {e}");
                Self {
                    source: None,
                    state: ViewerState::Failed(failure_message(Some(&e.to_string()), None)),
                }
            }
        }
    }

    /// Page to embed. `None` when the state is a message instead.
    pub fn source(&self) -> Option<&Url> {
        match self.state {
            ViewerState::Loading | ViewerState::Loaded => self.source.as_ref(),
            _ => None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewerState::Loading
    }

    pub fn load_started(&mut self) {
        if self.source.is_some() && self.state == ViewerState::Loaded {
            self.state = ViewerState::Loading;
        }
    }

    pub fn load_finished(&mut self) {
        if self.state == ViewerState::Loading {
            self.state = ViewerState::Loaded;
        }
    }

    pub fn load_failed(&mut self, description: Option<&str>, code: Option<i32>) {
        if self.source.is_none() {
            return;
        }
        let message = failure_message(description, code);
        tracing::warn!("document failed to load: {message}");
        self.state = ViewerState::Failed(message);
    }
}

fn failure_message(description: Option<&str>, code: Option<i32>) -> String {
    let detail = description
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .or_else(|| code.map(|c| c.to_string()))
        .unwrap_or_else(|| "Unknown error".to_string());
    format!("Failed to load document. Error: {detail}")
}
