#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use docintel_app::{AppShell, FormFields, Page, PageCommand, PageEvent, PageHandles};
use docintel_client::{DocumentService, FailureKind, RequestError};
use docintel_core::{BatchResponse, NotificationView, SelectedFile, UploadRequest, UploadResponse, ViewNode};
use tokio::sync::Semaphore;

pub const SETTLE: Duration = Duration::from_secs(5);

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docintel_logging::initialize_for_tests);
}

pub fn pdf(name: &str) -> SelectedFile {
    SelectedFile::new(name, b"%PDF-1.7 test".to_vec())
}

pub fn upload_response(json: &str) -> UploadResponse {
    serde_json::from_str(json).expect("valid upload json")
}

pub fn batch_response(json: &str) -> BatchResponse {
    serde_json::from_str(json).expect("valid batch json")
}

pub fn network_error() -> RequestError {
    RequestError {
        kind: FailureKind::Network,
        message: "connection refused".to_string(),
    }
}

/// Scripted stand-in for the document service.
///
/// Requests wait on a gate so tests can observe the in-flight state; call
/// [`FakeService::release`] to let them through.
pub struct FakeService {
    gate: Semaphore,
    uploads: Mutex<Vec<UploadRequest>>,
    batch_calls: Mutex<usize>,
    panic_next_upload: Mutex<bool>,
    upload_replies: Mutex<VecDeque<Result<UploadResponse, RequestError>>>,
    batch_replies: Mutex<VecDeque<Result<BatchResponse, RequestError>>>,
}

impl FakeService {
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            uploads: Mutex::new(Vec::new()),
            batch_calls: Mutex::new(0),
            panic_next_upload: Mutex::new(false),
            upload_replies: Mutex::new(VecDeque::new()),
            batch_replies: Mutex::new(VecDeque::new()),
        })
    }

    pub fn open() -> Arc<Self> {
        let service = Self::gated();
        service.release(1024);
        service
    }

    pub fn release(&self, requests: usize) {
        self.gate.add_permits(requests);
    }

    pub fn reply_upload(&self, reply: Result<UploadResponse, RequestError>) {
        self.upload_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_batch(&self, reply: Result<BatchResponse, RequestError>) {
        self.batch_replies.lock().unwrap().push_back(reply);
    }

    /// The next upload task panics instead of answering.
    pub fn panic_next_upload(&self) {
        *self.panic_next_upload.lock().unwrap() = true;
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn batch_calls(&self) -> usize {
        *self.batch_calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl DocumentService for FakeService {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, RequestError> {
        self.uploads.lock().unwrap().push(request.clone());
        let permit = self.gate.acquire().await.expect("gate open");
        permit.forget();
        if std::mem::take(&mut *self.panic_next_upload.lock().unwrap()) {
            panic!("upload task crashed");
        }
        self.upload_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(network_error()))
    }

    async fn run_collections(&self) -> Result<BatchResponse, RequestError> {
        *self.batch_calls.lock().unwrap() += 1;
        let permit = self.gate.acquire().await.expect("gate open");
        permit.forget();
        self.batch_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(network_error()))
    }
}

/// Page that applies commands to an in-memory model of the document.
#[derive(Debug, Default)]
pub struct RecordingPage {
    pub commands: Vec<PageCommand>,
    pub enabled: HashMap<String, bool>,
    pub labels: HashMap<String, (&'static str, &'static str)>,
    pub visible: HashMap<String, bool>,
    pub mounted: HashMap<String, ViewNode>,
    /// Top of the container first.
    pub banners: Vec<NotificationView>,
    pub scrolled: Vec<String>,
}

impl RecordingPage {
    pub fn is_enabled(&self, element: &str) -> bool {
        self.enabled.get(element).copied().unwrap_or(true)
    }

    pub fn is_visible(&self, element: &str) -> bool {
        self.visible.get(element).copied().unwrap_or(false)
    }

    pub fn label(&self, element: &str) -> &'static str {
        self.labels.get(element).map_or("", |(label, _)| label)
    }

    pub fn mounted_text(&self, element: &str) -> Option<String> {
        self.mounted.get(element).map(ViewNode::text_content)
    }

    pub fn banner_messages(&self) -> Vec<&str> {
        self.banners.iter().map(|banner| banner.message.as_str()).collect()
    }
}

impl Page for RecordingPage {
    fn apply(&mut self, command: PageCommand) {
        match &command {
            PageCommand::SetEnabled { element, enabled } => {
                self.enabled.insert(element.to_string(), *enabled);
            }
            PageCommand::SetTriggerLabel {
                element,
                label,
                icon,
            } => {
                self.labels.insert(element.to_string(), (*label, *icon));
            }
            PageCommand::SetVisible { element, visible } => {
                self.visible.insert(element.to_string(), *visible);
            }
            PageCommand::Mount { element, view } => {
                self.mounted.insert(element.to_string(), view.clone());
            }
            PageCommand::Clear { element } => {
                self.mounted.remove(element.as_str());
            }
            PageCommand::InsertBanner { banner, .. } => self.banners.insert(0, banner.clone()),
            PageCommand::RemoveBanner { id } => self.banners.retain(|banner| banner.id != *id),
            PageCommand::ScrollIntoView { element } => self.scrolled.push(element.to_string()),
        }
        self.commands.push(command);
    }
}

pub fn shell_with(service: Arc<FakeService>) -> AppShell<RecordingPage> {
    init_logging();
    AppShell::new(PageHandles::default(), RecordingPage::default(), service).expect("shell starts")
}

pub fn submit_upload(shell: &mut AppShell<RecordingPage>, fields: FormFields) {
    let element = shell.handles().upload_form.clone();
    shell.handle_event(PageEvent::FormSubmitted { element, fields });
}

pub fn submit_custom(shell: &mut AppShell<RecordingPage>, fields: FormFields) {
    let element = shell.handles().custom_form.clone();
    shell.handle_event(PageEvent::FormSubmitted { element, fields });
}

pub fn click_batch(shell: &mut AppShell<RecordingPage>) {
    let element = shell.handles().batch_trigger.clone();
    shell.handle_event(PageEvent::ButtonClicked { element });
}
