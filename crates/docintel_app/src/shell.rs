use std::sync::{mpsc, Arc};
use std::time::Duration;

use docintel_client::DocumentService;
use docintel_core::{
    update, AppState, AppViewModel, CustomForm, Effect, Msg, ProcessingMode, UploadForm,
};
use docintel_logging::{docintel_debug, docintel_info};

use crate::effects::EffectRunner;
use crate::render::render;
use crate::{AppError, FormFields, Page, PageCommand, PageEvent, PageHandles};

/// Selector value that reveals the advanced options region.
const ADVANCED_SENTINEL: &str = "advanced";

const FIELD_PROCESSING_TYPE: &str = "processing_type";
const FIELD_PERSONA: &str = "persona";
const FIELD_TASK: &str = "task";

/// Wires page events to the three flows and applies their results to the page.
///
/// The shell owns the only copy of the application state; every message is
/// applied on the caller's thread, one at a time.
pub struct AppShell<P: Page> {
    handles: PageHandles,
    page: P,
    state: AppState,
    rendered: AppViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    runner: EffectRunner,
}

impl<P: Page> AppShell<P> {
    pub fn new(
        handles: PageHandles,
        mut page: P,
        service: Arc<dyn DocumentService>,
    ) -> Result<Self, AppError> {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let runner = EffectRunner::new(service, msg_tx)?;

        let state = AppState::new();
        let initial_view = state.view();
        for command in render(&handles, None, &initial_view) {
            page.apply(command);
        }
        docintel_info!("app shell ready");

        Ok(Self {
            handles,
            page,
            state,
            rendered: initial_view,
            msg_rx,
            runner,
        })
    }

    pub fn handles(&self) -> &PageHandles {
        &self.handles
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn handle_event(&mut self, event: PageEvent) {
        if let Some(msg) = self.msg_for_event(event) {
            self.dispatch(msg);
        }
    }

    /// Applies every completion that has already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let count = inbox.len();
        for msg in inbox {
            self.dispatch(msg);
        }
        count
    }

    /// Waits up to `timeout` for one completion, then drains the rest.
    /// Returns `false` if nothing arrived.
    pub fn pump_timeout(&mut self, timeout: Duration) -> bool {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg);
                self.pump();
                true
            }
            Err(_) => false,
        }
    }

    fn msg_for_event(&self, event: PageEvent) -> Option<Msg> {
        let handles = &self.handles;
        match event {
            PageEvent::SelectionChanged { element, value } if element == handles.processing_select => {
                Some(Msg::ProcessingModeChanged(processing_mode(&value)))
            }
            PageEvent::FormSubmitted { element, fields } if element == handles.upload_form => {
                Some(Msg::UploadSubmitted(upload_form(fields)))
            }
            PageEvent::FormSubmitted { element, fields } if element == handles.custom_form => {
                Some(Msg::CustomSubmitted(custom_form(fields)))
            }
            PageEvent::ButtonClicked { element } if element == handles.batch_trigger => {
                Some(Msg::BatchSubmitted)
            }
            PageEvent::BannerDismissed { id } => Some(Msg::NotificationDismissed(id)),
            other => {
                docintel_debug!("ignoring unbound page event {:?}", other);
                None
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;

        let mut scrolls = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScrollIntoView { flow } => scrolls.push(PageCommand::ScrollIntoView {
                    element: self.handles.scroll_target(flow).clone(),
                }),
                other => self.runner.run(other),
            }
        }

        if let Some(view) = view {
            for command in render(&self.handles, Some(&self.rendered), &view) {
                self.page.apply(command);
            }
            self.rendered = view;
        }
        // Scroll only once the result is mounted.
        for command in scrolls {
            self.page.apply(command);
        }
    }
}

fn processing_mode(value: &str) -> ProcessingMode {
    if value == ADVANCED_SENTINEL {
        ProcessingMode::Advanced
    } else {
        ProcessingMode::Basic
    }
}

fn upload_form(fields: FormFields) -> UploadForm {
    UploadForm {
        mode: processing_mode(fields.value(FIELD_PROCESSING_TYPE)),
        persona: fields.value(FIELD_PERSONA).to_owned(),
        task: fields.value(FIELD_TASK).to_owned(),
        file: fields.file,
    }
}

fn custom_form(fields: FormFields) -> CustomForm {
    CustomForm {
        persona: fields.value(FIELD_PERSONA).to_owned(),
        task: fields.value(FIELD_TASK).to_owned(),
        file: fields.file,
    }
}
