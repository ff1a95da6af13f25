//! Multipart intake for angle submissions.
//!
//! Collects the text fields into an [`AngleForm`] and writes the optional
//! `avatarAngle` file to the file store before any catalog logic runs.

use angle_catalog_common::Error;
use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use super::error::ApiError;
use crate::catalog::AngleForm;
use crate::images::FileStore;

/// Multipart field carrying the image file.
pub const AVATAR_FIELD: &str = "avatarAngle";

/// Rejection for uploads without an image extension.
pub const IMAGE_ONLY_MESSAGE: &str = "Only image files are allowed";

/// Parsed submission: text fields plus the stored upload's file name.
#[derive(Debug, Default)]
pub struct AngleSubmission {
    pub form: AngleForm,
    pub upload: Option<String>,
}

struct PendingFile {
    file_name: String,
    data: Bytes,
}

/// Read a multipart body and store its image.
///
/// `failure` is the public message for a 500 if the file cannot be written.
pub async fn read_submission(
    files: &dyn FileStore,
    mut multipart: Multipart,
    failure: &str,
) -> Result<AngleSubmission, ApiError> {
    let mut form = AngleForm::default();
    let mut pending: Option<PendingFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(rejection)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == AVATAR_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(rejection)?;
            // Browsers send an empty part when no file was chosen.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            pending = Some(PendingFile { file_name, data });
        } else {
            let value = field.text().await.map_err(rejection)?;
            if !form.set(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    let upload = match pending {
        Some(file) => Some(store(files, &file, failure)?),
        None => None,
    };

    Ok(AngleSubmission { form, upload })
}

fn store(files: &dyn FileStore, file: &PendingFile, failure: &str) -> Result<String, ApiError> {
    match files.save(&file.file_name, &file.data) {
        Ok(name) => Ok(name),
        Err(Error::InvalidInput(_)) => {
            tracing::debug!(original = %file.file_name, "Rejected non-image upload");
            Err(ApiError::bad_request(IMAGE_ONLY_MESSAGE))
        }
        Err(e) => Err(ApiError::internal(failure, e)),
    }
}

fn rejection(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}
