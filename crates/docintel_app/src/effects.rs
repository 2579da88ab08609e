use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docintel_client::{DocumentService, RequestError};
use docintel_core::{
    BatchResponse, Effect, FlowKind, Msg, NotificationId, TransportFailure, UploadRequest,
    UploadResponse,
};
use docintel_logging::{docintel_debug, docintel_error, docintel_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::AppError;

enum RunnerCommand {
    Upload {
        flow: FlowKind,
        request: UploadRequest,
    },
    FetchCollections,
    Dismiss {
        id: NotificationId,
        after: Duration,
    },
}

/// Executes IO effects on a dedicated single-threaded runtime and posts
/// their outcomes back as messages.
pub struct EffectRunner {
    cmd_tx: UnboundedSender<RunnerCommand>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        service: Arc<dyn DocumentService>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;
        let (cmd_tx, mut cmd_rx) = unbounded_channel::<RunnerCommand>();
        let task_tx = msg_tx.clone();

        thread::Builder::new()
            .name("docintel-effects".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        tokio::spawn(run_command(service.clone(), command, task_tx.clone()));
                    }
                });
            })
            .map_err(AppError::Runtime)?;

        Ok(Self { cmd_tx, msg_tx })
    }

    /// Starts an IO effect. `ScrollIntoView` is a page concern and is ignored.
    pub fn run(&self, effect: Effect) {
        let command = match effect {
            Effect::Upload { flow, request } => RunnerCommand::Upload { flow, request },
            Effect::FetchCollections => RunnerCommand::FetchCollections,
            Effect::ScheduleDismiss { id, after } => RunnerCommand::Dismiss { id, after },
            Effect::ScrollIntoView { .. } => return,
        };
        if let Err(unsent) = self.cmd_tx.send(command) {
            docintel_error!("effect runner stopped; failing command immediately");
            // A request that cannot start must still settle its flow.
            let msg = match unsent.0 {
                RunnerCommand::Upload { flow, .. } => failed(flow, "effect runner stopped"),
                RunnerCommand::FetchCollections => failed(FlowKind::Batch, "effect runner stopped"),
                RunnerCommand::Dismiss { id, .. } => Msg::NotificationExpired(id),
            };
            let _ = self.msg_tx.send(msg);
        }
    }
}

async fn run_command(
    service: Arc<dyn DocumentService>,
    command: RunnerCommand,
    msg_tx: mpsc::Sender<Msg>,
) {
    match command {
        RunnerCommand::Upload { flow, request } => {
            let guard = CompletionGuard::new(flow, msg_tx);
            let outcome = service
                .upload(&request)
                .await
                .map_err(|err| transport_failure(flow, err));
            guard.deliver(upload_finished(flow, outcome));
        }
        RunnerCommand::FetchCollections => {
            let guard = CompletionGuard::new(FlowKind::Batch, msg_tx);
            let outcome = service
                .run_collections()
                .await
                .map_err(|err| transport_failure(FlowKind::Batch, err));
            guard.deliver(batch_finished(outcome));
        }
        RunnerCommand::Dismiss { id, after } => {
            tokio::time::sleep(after).await;
            docintel_debug!("banner {} expired", id);
            let _ = msg_tx.send(Msg::NotificationExpired(id));
        }
    }
}

/// Guarantees that a started request settles its flow exactly once.
///
/// If the task is dropped or unwinds before [`CompletionGuard::deliver`], the
/// flow receives a transport failure instead of staying busy.
struct CompletionGuard {
    flow: FlowKind,
    msg_tx: Option<mpsc::Sender<Msg>>,
}

impl CompletionGuard {
    fn new(flow: FlowKind, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            flow,
            msg_tx: Some(msg_tx),
        }
    }

    fn deliver(mut self, msg: Msg) {
        if let Some(tx) = self.msg_tx.take() {
            let _ = tx.send(msg);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.msg_tx.take() {
            docintel_warn!("{} request ended without a result", self.flow);
            let _ = tx.send(failed(self.flow, "request aborted"));
        }
    }
}

fn transport_failure(flow: FlowKind, err: RequestError) -> TransportFailure {
    docintel_warn!("{} request failed: {}", flow, err);
    TransportFailure::new(err.to_string())
}

fn upload_finished(flow: FlowKind, outcome: Result<UploadResponse, TransportFailure>) -> Msg {
    match flow {
        FlowKind::Custom => Msg::CustomFinished(outcome),
        _ => Msg::UploadFinished(outcome),
    }
}

fn batch_finished(outcome: Result<BatchResponse, TransportFailure>) -> Msg {
    Msg::BatchFinished(outcome)
}

fn failed(flow: FlowKind, detail: &str) -> Msg {
    let failure = TransportFailure::new(detail);
    match flow {
        FlowKind::Batch => batch_finished(Err(failure)),
        other => upload_finished(other, Err(failure)),
    }
}
