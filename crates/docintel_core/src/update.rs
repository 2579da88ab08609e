use std::panic::{self, AssertUnwindSafe};

use crate::flow::{
    validate_custom, validate_upload, AnalysisContext, Deficiency, FlowKind, FlowState,
    ProcessingMode,
};
use crate::format::{format_batch_result, format_custom_result, format_single_result};
use crate::model::{BatchResponse, DocumentResult, UploadResponse};
use crate::notify::{Severity, AUTO_DISMISS_AFTER};
use crate::view::ViewNode;
use crate::{AppState, Effect, Msg, TransportFailure};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProcessingModeChanged(mode) => {
            let visible = mode == ProcessingMode::Advanced;
            if state.advanced_options_visible != visible {
                state.advanced_options_visible = visible;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadSubmitted(form) => {
            if !state.upload.state().accepts_submission() {
                return (state, Vec::new());
            }
            match validate_upload(form) {
                Ok(request) => {
                    begin(&mut state, FlowKind::Upload);
                    vec![Effect::Upload {
                        flow: FlowKind::Upload,
                        request,
                    }]
                }
                Err(deficiency) => warn(&mut state, deficiency),
            }
        }
        Msg::BatchSubmitted => {
            if begin(&mut state, FlowKind::Batch) {
                vec![Effect::FetchCollections]
            } else {
                Vec::new()
            }
        }
        Msg::CustomSubmitted(form) => {
            if !state.custom.state().accepts_submission() {
                return (state, Vec::new());
            }
            match validate_custom(form) {
                Ok((request, context)) => {
                    begin(&mut state, FlowKind::Custom);
                    state.custom_context = Some(context);
                    vec![Effect::Upload {
                        flow: FlowKind::Custom,
                        request,
                    }]
                }
                Err(deficiency) => warn(&mut state, deficiency),
            }
        }
        Msg::UploadFinished(outcome) => finish_upload(&mut state, FlowKind::Upload, outcome),
        Msg::CustomFinished(outcome) => finish_upload(&mut state, FlowKind::Custom, outcome),
        Msg::BatchFinished(outcome) => finish_batch(&mut state, outcome),
        Msg::NotificationDismissed(id) | Msg::NotificationExpired(id) => {
            if state.notifications.dismiss(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn begin(state: &mut AppState, flow: FlowKind) -> bool {
    let started = state.flow_mut(flow).begin();
    if started {
        state.mark_dirty();
    }
    started
}

fn warn(state: &mut AppState, deficiency: Deficiency) -> Vec<Effect> {
    notify(state, deficiency.message(), Severity::Warning)
}

fn notify(state: &mut AppState, message: impl Into<String>, severity: Severity) -> Vec<Effect> {
    let id = state.notify(message, severity);
    vec![Effect::ScheduleDismiss {
        id,
        after: AUTO_DISMISS_AFTER,
    }]
}

fn finish_upload(
    state: &mut AppState,
    flow: FlowKind,
    outcome: Result<UploadResponse, TransportFailure>,
) -> Vec<Effect> {
    if state.flow(flow).state() != FlowState::Submitting {
        return Vec::new();
    }
    let context = match flow {
        FlowKind::Custom => state.custom_context.take().unwrap_or_default(),
        _ => AnalysisContext::default(),
    };

    match outcome {
        Ok(response) if response.success => {
            let result = response.result.unwrap_or_else(DocumentResult::default);
            let result_file = response.result_file;
            let message = match flow {
                FlowKind::Custom => "Custom Challenge 1B analysis completed!",
                _ => "PDF processed successfully!",
            };
            succeed_with(state, flow, message, || match flow {
                FlowKind::Custom => format_custom_result(&result, &context.persona, &context.task),
                _ => format_single_result(&result, result_file.as_deref()),
            })
        }
        Ok(response) => fail_with(state, flow, service_reason(response.error, flow)),
        Err(_) => fail_with(state, flow, flow.transport_failure_message()),
    }
}

fn finish_batch(state: &mut AppState, outcome: Result<BatchResponse, TransportFailure>) -> Vec<Effect> {
    let flow = FlowKind::Batch;
    match outcome {
        Ok(response) if response.success => {
            let batch = response.results.unwrap_or_default();
            let processed = response
                .collections_processed
                .unwrap_or(batch.len() as u64);
            let message = format!("Challenge 1B completed! Processed {processed} collections.");
            succeed_with(state, flow, message, || {
                format_batch_result(&batch, Some(processed), response.note.as_deref())
            })
        }
        Ok(response) => fail_with(state, flow, service_reason(response.error, flow)),
        Err(_) => fail_with(state, flow, flow.transport_failure_message()),
    }
}

/// Mounts the view from `build` and announces `message`.
///
/// A panicking `build` fails this flow alone, as if the response had never
/// arrived; the state of the other flows is untouched.
fn succeed_with(
    state: &mut AppState,
    flow: FlowKind,
    message: impl Into<String>,
    build: impl FnOnce() -> ViewNode,
) -> Vec<Effect> {
    let Some(settlement) = state.flow_mut(flow).settle() else {
        return Vec::new();
    };
    match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(view) => settlement.succeed(view),
        Err(_) => {
            settlement.fail();
            return notify(state, flow.transport_failure_message(), Severity::Danger);
        }
    }
    let mut effects = notify(state, message, Severity::Success);
    effects.push(Effect::ScrollIntoView { flow });
    effects
}

fn fail_with(state: &mut AppState, flow: FlowKind, reason: impl Into<String>) -> Vec<Effect> {
    let Some(settlement) = state.flow_mut(flow).settle() else {
        return Vec::new();
    };
    settlement.fail();
    notify(state, reason, Severity::Danger)
}

fn service_reason(error: Option<String>, flow: FlowKind) -> String {
    error
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| flow.failure_fallback().to_owned())
}
