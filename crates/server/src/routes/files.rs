use crate::error::{ServerError, ServerResult};
use crate::routes::text::ShinglesResponse;
use crate::state::ServerState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use textlens::{RawUpload, TokenStats};

/// Multipart field names that carry uploaded files
const FILE_FIELDS: [&str; 2] = ["file", "files"];

/// Parsed `multipart/form-data` body: uploaded files plus plain form fields
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<RawUpload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart body. Files come from the `file`/`files` fields in
    /// submission order; any other field is read as text.
    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> ServerResult<Self> {
        let mut multipart = multipart?;
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if FILE_FIELDS.contains(&name.as_str()) {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await?;
                form.files.push(RawUpload::new(file_name, content));
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Integer form field, or `default` when absent or blank.
    pub fn int_field(&self, name: &str, default: i64) -> ServerResult<i64> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| ServerError::BadRequest(format!("Field '{name}' must be an integer"))),
        }
    }

    /// Uploaded files; at least one is required.
    pub fn into_files(self) -> ServerResult<Vec<RawUpload>> {
        if self.files.is_empty() {
            return Err(ServerError::BadRequest("File is required".to_string()));
        }
        Ok(self.files)
    }
}

/// Per-file result used when several files were uploaded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult<T> {
    pub file_name: String,
    #[serde(flatten)]
    pub result: T,
}

/// One file gives the bare result, several give an array tagged with `fileName`.
pub(crate) fn one_or_many<T: Serialize>(mut results: Vec<FileResult<T>>) -> Response {
    if results.len() == 1 {
        if let Some(only) = results.pop() {
            return Json(only.result).into_response();
        }
    }
    Json(results).into_response()
}

/// Word-frequency statistics for each uploaded file.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Response> {
    let files = UploadForm::read(multipart).await?.into_files()?;

    let mut results: Vec<FileResult<TokenStats>> = Vec::with_capacity(files.len());
    for upload in files {
        let (file, stats) = textlens::analyze_file(upload, &state.files, &state.tokenizer)?;
        results.push(FileResult {
            file_name: file.file_name,
            result: stats,
        });
    }

    Ok(one_or_many(results))
}

/// `k`-shingle statistics for each uploaded file.
pub async fn shingles(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Response> {
    let form = UploadForm::read(multipart).await?;
    let k = form.int_field("k", state.config.analysis.default_k)?;
    let files = form.into_files()?;

    let mut results: Vec<FileResult<ShinglesResponse>> = Vec::with_capacity(files.len());
    for upload in files {
        let (file, stats) = textlens::shingle_file(upload, &state.files, &state.shingles, k)?;
        results.push(FileResult {
            file_name: file.file_name,
            result: ShinglesResponse {
                stats,
                shingles: None,
            },
        });
    }

    Ok(one_or_many(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_field_defaults_and_parses() {
        let mut form = UploadForm::default();
        assert_eq!(form.int_field("k", 3).unwrap(), 3);

        form.fields.insert("k".into(), " 4 ".into());
        assert_eq!(form.int_field("k", 3).unwrap(), 4);

        form.fields.insert("k".into(), "".into());
        assert_eq!(form.int_field("k", 3).unwrap(), 3);

        form.fields.insert("k".into(), "four".into());
        let err = form.int_field("k", 3).unwrap_err();
        assert_eq!(err.to_string(), "Field 'k' must be an integer");
    }

    #[test]
    fn files_required() {
        let err = UploadForm::default().into_files().unwrap_err();
        assert_eq!(err.to_string(), "File is required");
    }
}
