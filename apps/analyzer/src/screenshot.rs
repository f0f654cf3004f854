//! Screenshot: the input image, loaded once and shared by every pipeline step.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{GenericImageView, ImageFormat};
use tracing::debug;

use crate::errors::AnalyzerError;

/// Raw image bytes plus the metadata the prompts and the report need.
#[derive(Debug, Clone)]
pub struct Screenshot {
    bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl Screenshot {
    /// Reads and decodes the image at `path`.
    /// A missing file is `InputNotFound`; anything undecodable is `InvalidImage`.
    pub async fn open(path: &Path) -> Result<Self, AnalyzerError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AnalyzerError::InputNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(AnalyzerError::InvalidImage(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        let screenshot = Self::from_bytes(bytes)?;
        debug!(
            "Loaded screenshot {} ({}x{}, {})",
            path.display(),
            screenshot.width,
            screenshot.height,
            screenshot.mime_type()
        );
        Ok(screenshot)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AnalyzerError> {
        let format = image::guess_format(&bytes)
            .map_err(|e| AnalyzerError::InvalidImage(format!("unrecognised format: {e}")))?;
        let (width, height) = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| AnalyzerError::InvalidImage(format!("cannot decode image: {e}")))?
            .dimensions();

        Ok(Self {
            bytes,
            width,
            height,
            format,
        })
    }

    /// MIME type used both for the model payload and the embedded data URI.
    /// Formats without a dedicated mapping are labelled JPEG.
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            _ => "image/jpeg",
        }
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}

/// Encodes a blank PNG of the given size.
#[cfg(test)]
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([240, 240, 240]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
