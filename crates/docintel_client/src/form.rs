use docintel_core::{ProcessingMode, UploadRequest, UploadVariant};

pub(crate) const FILE_FIELD: &str = "file";
pub(crate) const PDF_MIME: &str = "application/pdf";

/// Wire value of the `processing_type` field.
pub fn processing_type(mode: ProcessingMode) -> &'static str {
    match mode {
        ProcessingMode::Basic => "basic",
        ProcessingMode::Advanced => "advanced",
    }
}

/// Text fields of the multipart upload body, in submission order.
pub fn form_fields(request: &UploadRequest) -> Vec<(&'static str, String)> {
    let mut fields = vec![("processing_type", processing_type(request.mode).to_owned())];
    if let Some(persona) = &request.persona {
        fields.push(("persona", persona.clone()));
    }
    if let Some(task) = &request.task {
        fields.push(("task", task.clone()));
    }
    if request.variant == UploadVariant::CollectionAnalysis {
        fields.push(("challenge1b_mode", "true".to_owned()));
    }
    fields
}
