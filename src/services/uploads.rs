use std::fs;

use actix_multipart::form::tempfile::TempFile;
use log::info;

use crate::domain::{StoredFileName, UploadRoot, UploadedPdf};
use crate::services::{ServiceError, ServiceResult};

/// Service accepting PDF uploads into the upload root.
#[derive(Clone, Debug)]
pub struct UploadService {
    upload_root: UploadRoot,
    max_upload_bytes: usize,
}

impl UploadService {
    pub fn new(upload_root: UploadRoot, max_upload_bytes: usize) -> Self {
        Self {
            upload_root,
            max_upload_bytes,
        }
    }

    pub fn upload_root(&self) -> &UploadRoot {
        &self.upload_root
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validate an uploaded temp file and move it into the upload root.
    pub fn persist_upload(&self, temp_file: TempFile) -> ServiceResult<UploadedPdf> {
        let is_pdf = temp_file
            .content_type
            .as_ref()
            .is_some_and(|content_type| {
                content_type.essence_str() == mime::APPLICATION_PDF.essence_str()
            });
        if !is_pdf {
            return Err(ServiceError::NotPdf);
        }

        if temp_file.size > self.max_upload_bytes {
            return Err(ServiceError::FileTooLarge {
                size: temp_file.size,
                limit: self.max_upload_bytes,
            });
        }

        self.upload_root
            .ensure()
            .map_err(ServiceError::StorageSetup)?;

        let stored_name = StoredFileName::generate();
        let target = self.upload_root.resolve(&stored_name);
        temp_file
            .file
            .persist(&target)
            .map_err(|err| ServiceError::SaveFile(err.error))?;
        let path = fs::canonicalize(&target).map_err(ServiceError::SaveFile)?;

        info!(
            "Stored upload {:?} ({} bytes) as {}",
            temp_file.file_name.as_deref().unwrap_or("<unnamed>"),
            temp_file.size,
            path.display()
        );

        Ok(UploadedPdf::new(path, temp_file.file_name, temp_file.size))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use tempfile::{NamedTempFile, tempdir};

    fn build_service(root: PathBuf, limit: usize) -> UploadService {
        UploadService::new(UploadRoot::from(root), limit)
    }

    fn temp_upload(content: &[u8], content_type: Option<mime::Mime>) -> TempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(content).unwrap();
        TempFile {
            file: temp,
            content_type,
            file_name: Some("report.pdf".to_string()),
            size: content.len(),
        }
    }

    #[test]
    fn persist_upload_stores_pdf_under_root() {
        let dir = tempdir().unwrap();
        let service = build_service(dir.path().join("uploads"), 1024);

        let upload = service
            .persist_upload(temp_upload(b"%PDF-1.7 body", Some(mime::APPLICATION_PDF)))
            .unwrap();

        assert!(upload.path().is_absolute());
        assert!(service.upload_root().contains(upload.path()));
        assert_eq!(upload.original_name(), Some("report.pdf"));
        assert_eq!(upload.size(), 13);
        assert_eq!(fs::read(upload.path()).unwrap(), b"%PDF-1.7 body");
    }

    #[test]
    fn persist_upload_rejects_non_pdf() {
        let dir = tempdir().unwrap();
        let service = build_service(dir.path().to_path_buf(), 1024);

        let err = service
            .persist_upload(temp_upload(b"hello", Some(mime::TEXT_PLAIN)))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotPdf));

        let err = service
            .persist_upload(temp_upload(b"%PDF-1.7", None))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotPdf));
    }

    #[test]
    fn persist_upload_rejects_oversized_files() {
        let dir = tempdir().unwrap();
        let service = build_service(dir.path().join("uploads"), 4);

        let err = service
            .persist_upload(temp_upload(b"%PDF-1.7", Some(mime::APPLICATION_PDF)))
            .unwrap_err();

        assert!(matches!(err, ServiceError::FileTooLarge { size: 8, limit: 4 }));
        assert!(err.is_client_error());
        assert!(!dir.path().join("uploads").exists());
    }

    #[test]
    fn persist_upload_generates_distinct_names() {
        let dir = tempdir().unwrap();
        let service = build_service(dir.path().to_path_buf(), 1024);

        let first = service
            .persist_upload(temp_upload(b"%PDF-1", Some(mime::APPLICATION_PDF)))
            .unwrap();
        let second = service
            .persist_upload(temp_upload(b"%PDF-2", Some(mime::APPLICATION_PDF)))
            .unwrap();

        assert_ne!(first.path(), second.path());
    }
}
