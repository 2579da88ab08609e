use docintel_core::{NotificationId, NotificationView, SelectedFile, ViewNode};

use crate::ElementId;

/// Field values of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    pub file: Option<SelectedFile>,
    values: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: SelectedFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    /// Last value submitted under `name`, or `""`.
    pub fn value(&self, name: &str) -> &str {
        self.values
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.as_str())
    }
}

/// Events the host page delivers to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SelectionChanged { element: ElementId, value: String },
    FormSubmitted { element: ElementId, fields: FormFields },
    ButtonClicked { element: ElementId },
    /// The close button of a banner was clicked.
    BannerDismissed { id: NotificationId },
}

/// Mutations the shell asks the host page to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    SetEnabled {
        element: ElementId,
        enabled: bool,
    },
    SetTriggerLabel {
        element: ElementId,
        label: &'static str,
        icon: &'static str,
    },
    SetVisible {
        element: ElementId,
        visible: bool,
    },
    /// Replace the element's children with `view`.
    Mount {
        element: ElementId,
        view: ViewNode,
    },
    /// Remove all children of the element.
    Clear {
        element: ElementId,
    },
    /// Insert a dismissible banner as the container's first child.
    InsertBanner {
        container: ElementId,
        banner: NotificationView,
    },
    /// Remove a banner; removing one that is already gone is a no-op.
    RemoveBanner {
        id: NotificationId,
    },
    ScrollIntoView {
        element: ElementId,
    },
}

/// The host page. Implementations apply commands in order.
pub trait Page {
    fn apply(&mut self, command: PageCommand);
}
