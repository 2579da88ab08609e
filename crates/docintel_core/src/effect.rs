use std::time::Duration;

use crate::flow::{FlowKind, UploadRequest};
use crate::notify::NotificationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one upload request; the outcome comes back as the matching
    /// `*Finished` message for `flow` (`Upload` or `Custom`).
    Upload {
        flow: FlowKind,
        request: UploadRequest,
    },
    /// Request the collections batch; answered by `Msg::BatchFinished`.
    FetchCollections,
    /// Deliver `Msg::NotificationExpired(id)` after `after`.
    ScheduleDismiss { id: NotificationId, after: Duration },
    /// Bring the flow's freshly mounted result into the viewport.
    ScrollIntoView { flow: FlowKind },
}
