use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

/// Multipart body of `POST /api/upload`. The overall body size is capped by
/// the `MultipartFormConfig` registered in [`crate::run`].
#[derive(MultipartForm)]
pub struct UploadPdfForm {
    pub file: TempFile,
}

/// Body of `POST /api/print`. Absent and `null` fields both deserialize as
/// `None` so that validation reports them uniformly.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrintForm {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub printer: Option<String>,
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub file_path: Option<String>,
}
