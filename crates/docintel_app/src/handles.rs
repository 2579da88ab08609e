use std::fmt;
use std::fs;
use std::path::Path;

use docintel_core::FlowKind;
use serde::Deserialize;

use crate::AppError;

/// Identifier of an element in the host page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Maps each logical role of the page to the element that plays it.
///
/// Injected at shell construction; nothing else looks elements up by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageHandles {
    pub upload_form: ElementId,
    pub processing_select: ElementId,
    pub advanced_options: ElementId,
    pub progress_region: ElementId,
    pub results_section: ElementId,
    pub results_content: ElementId,
    pub upload_trigger: ElementId,
    pub batch_trigger: ElementId,
    pub batch_results: ElementId,
    pub custom_form: ElementId,
    pub custom_trigger: ElementId,
    pub custom_results: ElementId,
    /// Banners are inserted at the top of this element.
    pub notification_container: ElementId,
}

impl Default for PageHandles {
    fn default() -> Self {
        Self {
            upload_form: "uploadForm".into(),
            processing_select: "processingType".into(),
            advanced_options: "advancedOptions".into(),
            progress_region: "progressSection".into(),
            results_section: "resultsSection".into(),
            results_content: "resultsContent".into(),
            upload_trigger: "processBtn".into(),
            batch_trigger: "processChallenge1B".into(),
            batch_results: "challenge1BResults".into(),
            custom_form: "challenge1bCustomForm".into(),
            custom_trigger: "processCustomBtn".into(),
            custom_results: "customChallenge1BResults".into(),
            notification_container: "alertContainer".into(),
        }
    }
}

impl PageHandles {
    /// Parses a RON document; roles it leaves out keep their default ids.
    pub fn from_ron(text: &str) -> Result<Self, AppError> {
        ron::from_str(text).map_err(|err| AppError::Handles(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ReadHandles {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn trigger(&self, flow: FlowKind) -> &ElementId {
        match flow {
            FlowKind::Upload => &self.upload_trigger,
            FlowKind::Batch => &self.batch_trigger,
            FlowKind::Custom => &self.custom_trigger,
        }
    }

    /// Element that receives the flow's mounted view.
    pub fn mount_point(&self, flow: FlowKind) -> &ElementId {
        match flow {
            FlowKind::Upload => &self.results_content,
            FlowKind::Batch => &self.batch_results,
            FlowKind::Custom => &self.custom_results,
        }
    }

    /// Element scrolled into view after a successful result.
    pub fn scroll_target(&self, flow: FlowKind) -> &ElementId {
        match flow {
            FlowKind::Upload => &self.results_section,
            FlowKind::Batch => &self.batch_results,
            FlowKind::Custom => &self.custom_results,
        }
    }
}
