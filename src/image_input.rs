/// Photo uploads
///
/// Photos are picked with the native file dialog, read off disk in the
/// background, and turned into an `ImagePart` ready to be inlined into a
/// Gemini request. The format is sniffed from the file contents, not the
/// extension.

use rfd::FileDialog;
use std::path::PathBuf;
use thiserror::Error;

use crate::gemini::ImagePart;

/// Extensions offered in the file dialog filter
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "bmp"];

#[derive(Debug, Error)]
pub enum ImageInputError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is empty")]
    Empty,
    #[error("file is not a supported image")]
    NotAnImage,
}

/// Show the native "open image" dialog
///
/// Returns `None` if the user cancelled.
pub fn pick_image(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
}

/// Read a photo from disk and wrap it for upload
pub async fn load_image(path: PathBuf) -> Result<ImagePart, ImageInputError> {
    let bytes = tokio::fs::read(&path).await?;
    let part = image_part_from_bytes(bytes)?;

    tracing::info!(
        "🖼️  Loaded {} ({}, {:.1} KB)",
        path.display(),
        part.mime_type(),
        part.bytes().len() as f64 / 1024.0
    );

    Ok(part)
}

/// Sniff the format of `bytes` and build an `ImagePart`
pub fn image_part_from_bytes(bytes: Vec<u8>) -> Result<ImagePart, ImageInputError> {
    if bytes.is_empty() {
        return Err(ImageInputError::Empty);
    }
    let format = image::guess_format(&bytes).map_err(|_| ImageInputError::NotAnImage)?;
    ImagePart::new(format.to_mime_type(), bytes).map_err(|_| ImageInputError::NotAnImage)
}
