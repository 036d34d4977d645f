//! Multipart form collection for the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::errors::AppError;
use crate::storage::UploadedImage;

/// Text fields and image parts of a multipart request.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    fields: HashMap<String, String>,
    images: HashMap<String, UploadedImage>,
}

impl UploadForm {
    /// Drain a multipart body. Parts with a file name are kept as images.
    pub(crate) async fn collect(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                form.images.insert(
                    name,
                    UploadedImage {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Trimmed text field, required to be non-empty.
    pub(crate) fn text(&self, name: &str) -> Result<String, AppError> {
        super::required(self.fields.get(name).map(String::as_str).unwrap_or(""), name)
    }

    /// Trimmed text field, `None` when absent or blank.
    pub(crate) fn optional_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Required email field, normalised.
    pub(crate) fn email(&self, name: &str) -> Result<String, AppError> {
        super::required_email(self.fields.get(name).map(String::as_str).unwrap_or(""), name)
    }

    /// Required numeric field.
    pub(crate) fn number<T: std::str::FromStr>(&self, name: &str) -> Result<T, AppError> {
        self.text(name)?
            .parse()
            .map_err(|_| AppError::Validation(format!("{} must be a number", name)))
    }

    /// Raw password field; never trimmed.
    pub(crate) fn secret(&self, name: &str) -> Result<String, AppError> {
        match self.fields.get(name) {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            _ => Err(AppError::Validation(format!("{} is required", name))),
        }
    }

    /// Required image part, checked to be a non-empty image.
    pub(crate) fn image(&mut self, name: &str) -> Result<UploadedImage, AppError> {
        let image = self
            .images
            .remove(name)
            .ok_or_else(|| AppError::Validation(format!("{} image is required", name)))?;
        image.validate(name)?;
        Ok(image)
    }

    #[cfg(test)]
    pub(crate) fn with_fields(fields: &[(&str, &str)]) -> Self {
        UploadForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            images: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let mut form = UploadForm::with_fields(&[
            ("title", "  Sahara trek "),
            ("prix", "120.5"),
            ("groupSize", "ten"),
            ("socialMediaLink", "  "),
        ]);

        assert_eq!(form.text("title").unwrap(), "Sahara trek");
        assert_eq!(form.number::<f64>("prix").unwrap(), 120.5);
        assert!(form.number::<i64>("groupSize").is_err());
        assert!(form.optional_text("socialMediaLink").is_none());
        assert!(form.text("missing").is_err());
        assert!(form.image("campPictureCover").is_err());
    }
}
