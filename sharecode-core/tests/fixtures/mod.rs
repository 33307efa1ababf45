//! Test fixtures for flow testing.
//!
//! This module provides a scripted host (picker, notifier, browser, viewer)
//! and fake services whose configuration state and upload results are fixed
//! up front.

#![allow(dead_code)]
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sharecode_core::{
    BrowserOpener, DocumentViewer, EnglishLabels, Host, Notifier, PickItem, Picker, Service,
    ServiceCatalog, ServiceDescriptor, ServiceError, ServiceKind, ServiceResult, Snippet,
    TextSource,
};

/// What the scripted picker answers
#[derive(Debug, Clone)]
pub enum Choice {
    /// Decline the picker
    Cancel,
    /// Choose the item with this label
    Label(&'static str),
    /// Choose by position
    Index(usize),
}

/// Picker answering from a script and recording what it was shown
#[derive(Default)]
pub struct ScriptedPicker {
    script: Mutex<VecDeque<Choice>>,
    shown: Mutex<Vec<Vec<PickItem>>>,
}

impl ScriptedPicker {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Vec<PickItem>> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl Picker for ScriptedPicker {
    async fn pick(&self, items: &[PickItem]) -> Option<usize> {
        self.shown.lock().unwrap().push(items.to_vec());
        match self.script.lock().unwrap().pop_front()? {
            Choice::Cancel => None,
            Choice::Label(label) => items.iter().position(|i| i.label == label),
            Choice::Index(index) => Some(index),
        }
    }
}

/// Notifier recording every message
#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Browser opener recording URLs
#[derive(Default)]
pub struct RecordingBrowser {
    pub urls: Mutex<Vec<String>>,
}

impl BrowserOpener for RecordingBrowser {
    fn open_url(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}

/// Viewer recording shown paths
#[derive(Default)]
pub struct RecordingViewer {
    pub paths: Mutex<Vec<PathBuf>>,
}

impl DocumentViewer for RecordingViewer {
    fn show(&self, path: &Path) -> std::io::Result<()> {
        self.paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Handles on the recording parts of a test host
pub struct TestHost {
    pub host: Host,
    pub picker: Arc<ScriptedPicker>,
    pub notifier: Arc<RecordingNotifier>,
    pub browser: Arc<RecordingBrowser>,
    pub viewer: Arc<RecordingViewer>,
}

impl TestHost {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        let picker = Arc::new(ScriptedPicker::new(script));
        let notifier = Arc::new(RecordingNotifier::default());
        let browser = Arc::new(RecordingBrowser::default());
        let viewer = Arc::new(RecordingViewer::default());
        let host = Host {
            picker: picker.clone(),
            notifier: notifier.clone(),
            browser: browser.clone(),
            viewer: viewer.clone(),
            labels: Arc::new(EnglishLabels),
        };
        Self {
            host,
            picker,
            notifier,
            browser,
            viewer,
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifier.errors.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.notifier.infos.lock().unwrap().clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.browser.urls.lock().unwrap().clone()
    }
}

/// Fixed result of a fake upload or open
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Succeed; uploads return this URL, opens return this path
    Succeed(&'static str),
    /// Fail with an authentication error
    FailAuth,
}

impl Behavior {
    fn error() -> ServiceError {
        ServiceError::Auth("status 401 Unauthorized: bad credentials".to_string())
    }
}

/// Description of one fake service variant
#[derive(Debug, Clone)]
pub struct FakeSpec {
    pub label: &'static str,
    pub anonymous: bool,
    pub configured: bool,
    pub behavior: Behavior,
}

impl FakeSpec {
    pub fn new(label: &'static str, anonymous: bool, configured: bool) -> Self {
        Self {
            label,
            anonymous,
            configured,
            behavior: Behavior::Succeed("https://example.test/s/1"),
        }
    }

    pub fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

/// Service whose answers come from a `FakeSpec`
pub struct FakeService {
    spec: FakeSpec,
    uploads: Arc<Mutex<Vec<(String, Snippet)>>>,
}

#[async_trait]
impl Service for FakeService {
    async fn upload(&self, snippet: Snippet) -> ServiceResult<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((self.spec.label.to_string(), snippet));
        match self.spec.behavior {
            Behavior::Succeed(url) => Ok(url.to_string()),
            Behavior::FailAuth => Err(Behavior::error()),
        }
    }

    async fn open(&self, host: &Host) -> ServiceResult<Option<PathBuf>> {
        match self.spec.behavior {
            Behavior::Succeed(path) => {
                let path = PathBuf::from(path);
                host.viewer.show(&path).map_err(ServiceError::Viewer)?;
                Ok(Some(path))
            }
            Behavior::FailAuth => Err(Behavior::error()),
        }
    }

    fn is_not_configured(&self) -> bool {
        !self.spec.configured
    }

    fn is_anonymous(&self) -> bool {
        self.spec.anonymous
    }
}

/// Catalog building fresh `FakeService`s from specs
pub struct FakeCatalog {
    specs: Vec<FakeSpec>,
    pub uploads: Arc<Mutex<Vec<(String, Snippet)>>>,
}

impl FakeCatalog {
    pub fn new(specs: Vec<FakeSpec>) -> Self {
        Self {
            specs,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn uploads(&self) -> Vec<(String, Snippet)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl ServiceCatalog for FakeCatalog {
    fn services(&self) -> Vec<ServiceDescriptor> {
        self.specs
            .iter()
            .map(|spec| ServiceDescriptor {
                label: spec.label.to_string(),
                kind: ServiceKind::Pastebin,
                service: Box::new(FakeService {
                    spec: spec.clone(),
                    uploads: Arc::clone(&self.uploads),
                }),
            })
            .collect()
    }
}

/// In-memory editor state
pub struct Editor {
    pub path: &'static str,
    pub language: &'static str,
    pub text: &'static str,
    pub selection: Option<&'static str>,
}

impl TextSource for Editor {
    fn document_text(&self) -> String {
        self.text.to_string()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.map(str::to_string)
    }

    fn language_id(&self) -> String {
        self.language.to_string()
    }

    fn uri_path(&self) -> String {
        self.path.to_string()
    }
}
