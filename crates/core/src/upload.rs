//! Naming rules for uploaded images.
//!
//! A record has two fixed image slots. Stored files are named
//! `<epoch-millis>-<slot>-<uuid><ext>` and exposed under [`PUBLIC_IMAGE_PREFIX`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extension used when the original filename has none we can use.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";

/// Extensions the form accepts for image selection (compared lowercased).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".webp", ".svg", ".png"];

/// Root-relative URL prefix of stored images.
pub const PUBLIC_IMAGE_PREFIX: &str = "/images";

/// Longest extension (without the dot) kept from a client filename.
const MAX_EXTENSION_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One of the two image attachment positions on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSlot {
    Image1,
    Image2,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::Image1, ImageSlot::Image2];

    /// Multipart / JSON field name of the slot.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Image1 => "image1",
            Self::Image2 => "image2",
        }
    }

    /// 1-based slot number used in stored file names.
    pub fn number(self) -> u8 {
        match self {
            Self::Image1 => 1,
            Self::Image2 => 2,
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "image1" => Some(Self::Image1),
            "image2" => Some(Self::Image2),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// Extract the extension (with leading dot, lowercased) of a client filename.
///
/// Only the base name is considered. A leading dot does not start an
/// extension (`.hidden` has none). Empty, overlong or non-alphanumeric
/// extensions fall back to [`DEFAULT_IMAGE_EXTENSION`] so the result is
/// always safe to put in a filesystem path.
pub fn file_extension(original_name: &str) -> String {
    let ext = raw_extension(original_name).unwrap_or("");

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return DEFAULT_IMAGE_EXTENSION.to_string();
    }
    format!(".{}", ext.to_ascii_lowercase())
}

/// Whether the form accepts a file with this name as an image.
///
/// The extension of the base name, lowercased, must be one of
/// [`ALLOWED_IMAGE_EXTENSIONS`]. A name without an extension is refused.
pub fn is_allowed_image(file_name: &str) -> bool {
    raw_extension(file_name).is_some_and(|ext| {
        ALLOWED_IMAGE_EXTENSIONS.contains(&format!(".{}", ext.to_lowercase()).as_str())
    })
}

/// Text after the last dot of the base name, unless that dot starts the name.
fn raw_extension(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rfind('.') {
        Some(idx) if idx > 0 => Some(&base[idx + 1..]),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Stored names
// ---------------------------------------------------------------------------

/// Deterministic stored filename from its parts.
pub fn stored_file_name(slot: ImageSlot, epoch_millis: i64, unique: Uuid, extension: &str) -> String {
    format!(
        "{epoch_millis}-{}-{}{extension}",
        slot.number(),
        unique.simple()
    )
}

/// Fresh stored filename for an upload in `slot`.
pub fn generate_file_name(slot: ImageSlot, original_name: &str) -> String {
    stored_file_name(
        slot,
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        &file_extension(original_name),
    )
}

/// Root-relative URL path of a stored file.
pub fn public_path(file_name: &str) -> String {
    format!("{PUBLIC_IMAGE_PREFIX}/{file_name}")
}
