//! Document-intelligence controller core: pure flow state machines, the
//! service data model and the result formatters.
mod effect;
mod flow;
mod format;
mod model;
mod msg;
mod notify;
mod state;
mod update;
mod view;
mod view_model;

pub use effect::Effect;
pub use flow::{
    validate_custom, validate_upload, AnalysisContext, BusyAffordance, CustomForm, Deficiency,
    FlowKind, FlowState, ProcessingMode, SelectedFile, UploadForm, UploadRequest, UploadVariant,
};
pub use format::{
    custom_busy_placeholder, download_href, format_batch_result, format_custom_result,
    format_single_result, DOWNLOAD_ROUTE,
};
pub use model::{
    BatchResponse, CollectionBatch, CollectionMetadata, CollectionResult, DocumentResult, Heading,
    HeadingLevel, RankedItem, RankedSection, Table, TableRow, UploadResponse, UNTITLED_DOCUMENT,
};
pub use msg::{Msg, TransportFailure};
pub use notify::{Notification, NotificationCenter, NotificationId, Severity, AUTO_DISMISS_AFTER};
pub use state::{AppState, FlowSlot};
pub use update::update;
pub use view::{el, Element, ViewNode};
pub use view_model::{AppViewModel, FlowView, NotificationView, TriggerView};
