use crate::flow::FlowState;
use crate::notify::{NotificationId, Severity};
use crate::view::ViewNode;

/// Snapshot of everything the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub advanced_options_visible: bool,
    pub upload: FlowView,
    pub batch: FlowView,
    pub custom: FlowView,
    /// Most recent first.
    pub notifications: Vec<NotificationView>,
}

impl AppViewModel {
    pub fn flow(&self, kind: crate::FlowKind) -> &FlowView {
        match kind {
            crate::FlowKind::Upload => &self.upload,
            crate::FlowKind::Batch => &self.batch,
            crate::FlowKind::Custom => &self.custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowView {
    pub state: FlowState,
    pub trigger: TriggerView,
    /// Only the upload flow has a dedicated progress region.
    pub progress_visible: bool,
    /// What the flow's result region shows; `None` hides it.
    pub content: Option<ViewNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}
