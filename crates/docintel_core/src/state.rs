use crate::flow::{AnalysisContext, FlowKind, FlowState};
use crate::notify::{NotificationCenter, NotificationId, Severity};
use crate::view::ViewNode;
use crate::view_model::{AppViewModel, FlowView, NotificationView, TriggerView};
use crate::{format, BusyAffordance};

/// State of one flow: its lifecycle and the last successfully mounted view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowSlot {
    state: FlowState,
    mounted: Option<ViewNode>,
}

impl FlowSlot {
    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn mounted(&self) -> Option<&ViewNode> {
        self.mounted.as_ref()
    }

    /// Moves to `Submitting` if the flow accepts a submission.
    pub(crate) fn begin(&mut self) -> bool {
        if !self.state.accepts_submission() {
            return false;
        }
        self.state = FlowState::Submitting;
        true
    }

    /// Starts settling an in-flight request. `None` if nothing is in flight.
    pub(crate) fn settle(&mut self) -> Option<Settlement<'_>> {
        if self.state != FlowState::Submitting {
            return None;
        }
        Some(Settlement {
            slot: self,
            succeeded: false,
        })
    }
}

/// Scoped settlement of an in-flight request.
///
/// Dropping it without [`Settlement::succeed`] leaves the flow `Failed`, so a
/// flow can never stay `Submitting` once its outcome has been handled.
pub(crate) struct Settlement<'a> {
    slot: &'a mut FlowSlot,
    succeeded: bool,
}

impl Settlement<'_> {
    pub(crate) fn succeed(mut self, view: ViewNode) {
        self.slot.mounted = Some(view);
        self.slot.state = FlowState::Succeeded;
        self.succeeded = true;
    }

    pub(crate) fn fail(self) {}
}

impl Drop for Settlement<'_> {
    fn drop(&mut self) {
        if !self.succeeded {
            self.slot.state = FlowState::Failed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) upload: FlowSlot,
    pub(crate) batch: FlowSlot,
    pub(crate) custom: FlowSlot,
    /// Persona/task of the custom analysis currently in flight.
    pub(crate) custom_context: Option<AnalysisContext>,
    pub(crate) advanced_options_visible: bool,
    pub(crate) notifications: NotificationCenter,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flow(&self, kind: FlowKind) -> &FlowSlot {
        match kind {
            FlowKind::Upload => &self.upload,
            FlowKind::Batch => &self.batch,
            FlowKind::Custom => &self.custom,
        }
    }

    pub(crate) fn flow_mut(&mut self, kind: FlowKind) -> &mut FlowSlot {
        match kind {
            FlowKind::Upload => &mut self.upload,
            FlowKind::Batch => &mut self.batch,
            FlowKind::Custom => &mut self.custom,
        }
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn advanced_options_visible(&self) -> bool {
        self.advanced_options_visible
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.dirty = true;
        self.notifications.notify(message, severity)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            advanced_options_visible: self.advanced_options_visible,
            upload: flow_view(FlowKind::Upload, &self.upload),
            batch: flow_view(FlowKind::Batch, &self.batch),
            custom: flow_view(FlowKind::Custom, &self.custom),
            notifications: self
                .notifications
                .banners()
                .iter()
                .map(|banner| NotificationView {
                    id: banner.id,
                    message: banner.message.clone(),
                    severity: banner.severity,
                })
                .collect(),
        }
    }
}

fn flow_view(kind: FlowKind, slot: &FlowSlot) -> FlowView {
    let busy = slot.state == FlowState::Submitting;
    let trigger = if busy {
        TriggerView {
            enabled: false,
            label: kind.busy_label(),
            icon: kind.busy_icon(),
        }
    } else {
        TriggerView {
            enabled: true,
            label: kind.idle_label(),
            icon: kind.idle_icon(),
        }
    };

    let (progress_visible, content) = match (busy, kind.busy_affordance()) {
        (true, BusyAffordance::ProgressRegion) => (true, None),
        (true, BusyAffordance::Placeholder) => (false, Some(format::custom_busy_placeholder())),
        _ => (false, slot.mounted.clone()),
    };

    FlowView {
        state: slot.state,
        trigger,
        progress_visible,
        content,
    }
}
