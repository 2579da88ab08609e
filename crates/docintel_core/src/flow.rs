use std::fmt;

/// The three independent request flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    /// Single-document upload and processing.
    Upload,
    /// Bulk processing of the server-side collections.
    Batch,
    /// Persona/task driven single-document analysis.
    Custom,
}

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [FlowKind::Upload, FlowKind::Batch, FlowKind::Custom];

    pub fn idle_label(self) -> &'static str {
        match self {
            FlowKind::Upload => "Process PDF",
            FlowKind::Batch => "Process Challenge 1B Collections",
            FlowKind::Custom => "Analyze with AI",
        }
    }

    pub fn idle_icon(self) -> &'static str {
        match self {
            FlowKind::Upload => "fas fa-cogs",
            FlowKind::Batch => "fas fa-play",
            FlowKind::Custom => "fas fa-brain",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            FlowKind::Upload | FlowKind::Batch => "Processing...",
            FlowKind::Custom => "Analyzing...",
        }
    }

    pub fn busy_icon(self) -> &'static str {
        "fas fa-spinner fa-spin"
    }

    pub fn busy_affordance(self) -> BusyAffordance {
        match self {
            FlowKind::Upload => BusyAffordance::ProgressRegion,
            FlowKind::Batch => BusyAffordance::TriggerOnly,
            FlowKind::Custom => BusyAffordance::Placeholder,
        }
    }

    /// Used when the service reports failure without a reason.
    pub fn failure_fallback(self) -> &'static str {
        match self {
            FlowKind::Upload | FlowKind::Custom => "Processing failed",
            FlowKind::Batch => "Challenge 1B processing failed",
        }
    }

    /// Shown for transport and decode failures; details only go to the log.
    pub fn transport_failure_message(self) -> &'static str {
        match self {
            FlowKind::Upload | FlowKind::Custom => "An error occurred during processing.",
            FlowKind::Batch => "An error occurred during Challenge 1B processing.",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowKind::Upload => "upload",
            FlowKind::Batch => "batch",
            FlowKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// How a flow signals that a request is in flight, beyond its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyAffordance {
    /// A dedicated progress region is shown and the results region hidden.
    ProgressRegion,
    /// A busy placeholder is mounted in the result region.
    Placeholder,
    TriggerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl FlowState {
    /// `Succeeded` and `Failed` behave like `Idle` for new submissions.
    pub fn accepts_submission(self) -> bool {
        !matches!(self, FlowState::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    #[default]
    Basic,
    Advanced,
}

/// Whether an upload is a plain processing request or a persona/task
/// collection-style analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadVariant {
    #[default]
    Standard,
    CollectionAnalysis,
}

#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Inputs of the upload form at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub mode: ProcessingMode,
    pub persona: String,
    pub task: String,
}

/// Inputs of the custom analysis form at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomForm {
    pub file: Option<SelectedFile>,
    pub persona: String,
    pub task: String,
}

/// A validated upload, ready for serialization by the service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub mode: ProcessingMode,
    pub variant: UploadVariant,
    pub persona: Option<String>,
    pub task: Option<String>,
}

/// Persona and task as the user typed them for a custom analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisContext {
    pub persona: String,
    pub task: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deficiency {
    NoFileSelected,
    BlankTask,
}

impl Deficiency {
    pub fn message(self) -> &'static str {
        match self {
            Deficiency::NoFileSelected => "Please select a PDF file.",
            Deficiency::BlankTask => "Please describe your task.",
        }
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn validate_upload(form: UploadForm) -> Result<UploadRequest, Deficiency> {
    let file = form.file.ok_or(Deficiency::NoFileSelected)?;
    Ok(UploadRequest {
        file,
        mode: form.mode,
        variant: UploadVariant::Standard,
        persona: non_blank(form.persona),
        task: non_blank(form.task),
    })
}

/// Custom analyses always run in advanced mode as a collection-style request.
pub fn validate_custom(form: CustomForm) -> Result<(UploadRequest, AnalysisContext), Deficiency> {
    let file = form.file.ok_or(Deficiency::NoFileSelected)?;
    if form.task.trim().is_empty() {
        return Err(Deficiency::BlankTask);
    }
    let context = AnalysisContext {
        persona: form.persona.clone(),
        task: form.task.clone(),
    };
    let request = UploadRequest {
        file,
        mode: ProcessingMode::Advanced,
        variant: UploadVariant::CollectionAnalysis,
        persona: non_blank(form.persona),
        task: non_blank(form.task),
    };
    Ok((request, context))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> Option<SelectedFile> {
        Some(SelectedFile::new("doc.pdf", b"%PDF-1.4".to_vec()))
    }

    #[test]
    fn upload_requires_a_file() {
        let err = validate_upload(UploadForm::default()).unwrap_err();
        assert_eq!(err, Deficiency::NoFileSelected);
    }

    #[test]
    fn custom_checks_file_before_task() {
        let err = validate_custom(CustomForm::default()).unwrap_err();
        assert_eq!(err, Deficiency::NoFileSelected);

        let err = validate_custom(CustomForm {
            file: pdf(),
            persona: "Analyst".into(),
            task: "  \t ".into(),
        })
        .unwrap_err();
        assert_eq!(err.message(), "Please describe your task.");
    }

    #[test]
    fn custom_forces_advanced_collection_mode() {
        let (request, context) = validate_custom(CustomForm {
            file: pdf(),
            persona: "Travel Planner".into(),
            task: " Plan a trip ".into(),
        })
        .unwrap();
        assert_eq!(request.mode, ProcessingMode::Advanced);
        assert_eq!(request.variant, UploadVariant::CollectionAnalysis);
        assert_eq!(request.task.as_deref(), Some("Plan a trip"));
        assert_eq!(context.task, " Plan a trip ");
    }
}
