pub mod auth;
pub mod comment;
pub mod profile;
pub mod question;
pub mod suggest;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::domain::types::Upload;
use crate::error::HelpdeskError;

/// Parsed multipart form: named text fields plus at most one file part
/// (the last one wins, matching browser single-file inputs).
pub(crate) struct FormData {
    fields: HashMap<String, String>,
    pub upload: Option<Upload>,
}

impl FormData {
    /// Take a required text field.
    pub fn require(&mut self, name: &str) -> Result<String, HelpdeskError> {
        self.fields.remove(name).ok_or(HelpdeskError::MissingData)
    }

    /// Take an optional text field.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

pub(crate) async fn read_form(mut multipart: Multipart) -> Result<FormData, HelpdeskError> {
    let mut fields = HashMap::new();
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| HelpdeskError::InvalidMultipart)?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match field.file_name().map(ToOwned::to_owned) {
            // Browsers submit an empty file part when nothing was picked.
            Some(filename) if !filename.is_empty() => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| HelpdeskError::InvalidMultipart)?;
                upload = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some(_) => {}
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| HelpdeskError::InvalidMultipart)?;
                fields.insert(name, text);
            }
        }
    }
    Ok(FormData { fields, upload })
}
