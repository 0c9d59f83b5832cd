//! Client-side image compression before upload.
//!
//! Images larger than the configured byte budget or pixel bound are
//! downscaled and re-encoded. Images already inside both limits are passed
//! through byte for byte.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::CoreError;

/// Default byte budget (0.5 MiB).
pub const DEFAULT_MAX_BYTES: usize = 512 * 1024;

/// Default bound for the longest side, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// JPEG qualities tried in order until the output fits the byte budget.
const JPEG_QUALITY_STEPS: &[u8] = &[90, 80, 70, 60, 50, 40, 30, 20, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    pub max_bytes: usize,
    pub max_dimension: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Output of [`compress_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    /// Extension matching the encoded bytes, with leading dot.
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
    /// `false` when the input was returned unchanged.
    pub recompressed: bool,
}

/// Compress a PNG, JPEG or WebP image to fit `options`.
///
/// PNG input stays PNG when the re-encoded file fits; everything else that
/// needs shrinking becomes JPEG. The smallest JPEG attempt is returned even
/// if it still exceeds the budget.
pub fn compress_image(data: &[u8], options: &CompressionOptions) -> Result<CompressedImage, CoreError> {
    let format = image::guess_format(data)
        .map_err(|e| CoreError::Validation(format!("Unrecognized image data: {e}")))?;
    let extension = match format {
        ImageFormat::Png => ".png",
        ImageFormat::Jpeg => ".jpg",
        ImageFormat::WebP => ".webp",
        other => {
            return Err(CoreError::Validation(format!(
                "Unsupported image format {other:?}"
            )))
        }
    };

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| CoreError::Validation(format!("Failed to decode image: {e}")))?;
    let (width, height) = img.dimensions();
    let max_dim = options.max_dimension;

    if width <= max_dim && height <= max_dim && data.len() <= options.max_bytes {
        return Ok(CompressedImage {
            bytes: data.to_vec(),
            extension,
            width,
            height,
            recompressed: false,
        });
    }

    let img = if width > max_dim || height > max_dim {
        img.resize(max_dim, max_dim, FilterType::Triangle)
    } else {
        img
    };
    let (width, height) = img.dimensions();

    if format == ImageFormat::Png {
        let png = encode_png(&img)?;
        if png.len() <= options.max_bytes {
            return Ok(CompressedImage {
                bytes: png,
                extension: ".png",
                width,
                height,
                recompressed: true,
            });
        }
    }

    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut smallest = Vec::new();
    for &quality in JPEG_QUALITY_STEPS {
        let jpeg = encode_jpeg(&rgb, quality)?;
        let fits = jpeg.len() <= options.max_bytes;
        smallest = jpeg;
        if fits {
            break;
        }
    }

    Ok(CompressedImage {
        bytes: smallest,
        extension: ".jpg",
        width,
        height,
        recompressed: true,
    })
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, CoreError> {
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let mut out = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}
