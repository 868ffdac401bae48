//! Resume upload handling: reads the referral multipart form, enforces the
//! PDF-only rule, and writes accepted files under a generated name.

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::schema::CandidateForm;
use crate::errors::AppError;

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
/// The only multipart field that may carry a file.
pub const RESUME_FIELD: &str = "resume";

/// A resume received in the request, not yet written to disk.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub original_name: String,
    pub bytes: Bytes,
}

/// The parsed create-candidate request.
#[derive(Debug, Default)]
pub struct ReferralUpload {
    pub form: CandidateForm,
    pub resume: Option<ResumeFile>,
}

/// A resume written into the upload directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResume {
    pub file_name: String,
    pub path: PathBuf,
}

impl StoredResume {
    pub fn public_url(&self) -> String {
        format!("{PUBLIC_PREFIX}/{}", self.file_name)
    }
}

/// Local directory holding uploaded resumes. Created on first write.
#[derive(Debug, Clone)]
pub struct ResumeStorage {
    dir: PathBuf,
}

impl ResumeStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn store(&self, file: &ResumeFile) -> Result<StoredResume, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = generated_file_name(&file.original_name);
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &file.bytes).await?;

        info!(
            "Stored resume '{}' as {} ({} bytes)",
            file.original_name,
            path.display(),
            file.bytes.len()
        );
        Ok(StoredResume { file_name, path })
    }

    /// Best-effort removal of the file behind a public `resume_url`.
    /// Missing files are skipped; failures are logged, never returned.
    pub async fn remove(&self, resume_url: &str) {
        let Some(file_name) = Path::new(resume_url).file_name() else {
            warn!("Ignoring resume url without a file name: {resume_url}");
            return;
        };
        let path = self.dir.join(file_name);

        match tokio::fs::try_exists(&path).await {
            Ok(true) => match tokio::fs::remove_file(&path).await {
                Ok(()) => info!("Removed resume {}", path.display()),
                Err(e) => warn!("Failed to remove resume {}: {e}", path.display()),
            },
            Ok(false) => info!("Resume {} already absent", path.display()),
            Err(e) => warn!("Could not check resume {}: {e}", path.display()),
        }
    }
}

/// Random base name, original extension kept (`cv.pdf` -> `<uuid>.pdf`).
pub fn generated_file_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

pub fn ensure_pdf(content_type: Option<&str>) -> Result<(), AppError> {
    match content_type {
        Some(PDF_MEDIA_TYPE) => Ok(()),
        _ => Err(AppError::Validation("Only PDF files allowed".to_string())),
    }
}

/// Reads the create-candidate multipart body.
///
/// Text fields land in a `CandidateForm`; a single `resume` file is accepted
/// and must declare the PDF media type. Files under any other field name, or
/// a second resume, fail the request.
pub async fn read_referral_form(mut multipart: Multipart) -> Result<ReferralUpload, AppError> {
    let mut upload = ReferralUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if let Some(original_name) = field.file_name().map(str::to_string) {
            // browsers submit an empty, nameless part for an untouched file input
            if original_name.is_empty() {
                field.bytes().await?;
                continue;
            }
            if name != RESUME_FIELD || upload.resume.is_some() {
                return Err(AppError::Validation(format!("Unexpected field: {name}")));
            }
            ensure_pdf(field.content_type())?;
            let bytes = field.bytes().await?;
            upload.resume = Some(ResumeFile {
                original_name,
                bytes,
            });
            continue;
        }

        let text = field.text().await?;
        let form = &mut upload.form;
        match name.as_str() {
            "name" => form.name = Some(text),
            "email" => form.email = Some(text),
            "phone" => form.phone = Some(text),
            "job_title" => form.job_title = Some(text),
            "status" => form.status = Some(text),
            _ => {}
        }
    }

    Ok(upload)
}
