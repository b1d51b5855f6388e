use std::path::PathBuf;

use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use crate::{Error, Result};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_MIMES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Clone, PartialEq)]
pub struct SavedImage {
    pub filename: String,
    pub url: String,
}

#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    pub async fn save_image(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<SavedImage> {
        if !ALLOWED_IMAGE_MIMES.contains(&content_type) {
            return Err(Error::InvalidFileType);
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(Error::FileTooLarge);
        }

        let extension = extension_for(original_name, content_type);
        // o começo do uuid v7 é o timestamp, o sufixo aleatório fica no final
        let uuid = Uuid::now_v7().simple().to_string();
        let suffix = &uuid[uuid.len() - 7..];
        let filename = format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension);

        fs::write(self.upload_dir.join(&filename), data).await?;

        Ok(SavedImage { url: format!("/uploads/{}", filename), filename })
    }
}

fn extension_for(original_name: Option<&str>, content_type: &str) -> String {
    if let Some(name) = original_name {
        // ".gitignore" não tem extensão
        if let Some(idx) = name.rfind('.') {
            if idx > 0 {
                return name[idx..].to_string();
            }
        }
    }

    match content_type {
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        _ => ".jpg",
    }
    .to_string()
}
