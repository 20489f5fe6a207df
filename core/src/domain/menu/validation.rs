use std::path::Path;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::value_objects::{ALLOWED_EXTENSIONS, ImageFormat},
};

/// Validates an uploaded menu image before anything is sent to a provider.
///
/// The checks run in a fixed order and the first failure wins. On success the
/// format detected from the file's magic bytes is returned; that format, not
/// the declared one, is what the provider receives.
pub fn validate_image(
    filename: Option<&str>,
    declared_mime: Option<&str>,
    data: &[u8],
    max_size: usize,
) -> Result<ImageFormat, CoreError> {
    let filename = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CoreError::NoFile("No file selected".to_string()))?;

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if ImageFormat::from_extension(extension).is_none() {
        return Err(CoreError::InvalidImage(format!(
            "File type not allowed. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let declared_mime = declared_mime.unwrap_or("application/octet-stream");
    if ImageFormat::from_mime(declared_mime).is_none() {
        return Err(CoreError::InvalidImage(format!(
            "Invalid MIME type: {}",
            declared_mime
        )));
    }

    if data.len() > max_size {
        return Err(CoreError::FileTooLarge { max: max_size });
    }

    if data.is_empty() {
        return Err(CoreError::InvalidImage("File is empty".to_string()));
    }

    sniff_format(data).ok_or_else(|| CoreError::InvalidImage("Invalid image file".to_string()))
}

fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    match image::guess_format(data).ok()? {
        image::ImageFormat::Png => Some(ImageFormat::Png),
        image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
        image::ImageFormat::WebP => Some(ImageFormat::Webp),
        _ => None,
    }
}
