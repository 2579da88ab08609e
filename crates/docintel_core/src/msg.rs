use crate::flow::{CustomForm, ProcessingMode, UploadForm};
use crate::model::{BatchResponse, UploadResponse};
use crate::notify::NotificationId;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User changed the processing-mode selector.
    ProcessingModeChanged(ProcessingMode),
    /// User submitted the upload form.
    UploadSubmitted(UploadForm),
    /// User clicked the batch trigger.
    BatchSubmitted,
    /// User submitted the custom analysis form.
    CustomSubmitted(CustomForm),
    /// Outcome of the upload request.
    UploadFinished(Result<UploadResponse, TransportFailure>),
    /// Outcome of the collections request.
    BatchFinished(Result<BatchResponse, TransportFailure>),
    /// Outcome of the custom analysis request.
    CustomFinished(Result<UploadResponse, TransportFailure>),
    /// User closed a banner.
    NotificationDismissed(NotificationId),
    /// A banner's auto-dismiss timer fired.
    NotificationExpired(NotificationId),
}

/// A request that never produced a usable response body: network error,
/// timeout, non-JSON body, or an aborted task. The detail is for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub detail: String,
}

impl TransportFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
