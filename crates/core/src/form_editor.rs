//! State machine behind the form return editor.
//!
//! The editor owns the draft text, selected images and district
//! suggestions. It performs no I/O: a driver (see the `formreturn-client`
//! crate) calls [`FormEditor::begin_submit`], talks to the server, then
//! reports the outcome back through [`FormEditor::phone_taken`],
//! [`FormEditor::submit_failed`] or [`FormEditor::submit_succeeded`].
//!
//! ```text
//! Editing --begin_submit--> Submitting --submit_succeeded--> Submitted
//!    ^                          |
//!    +--phone_taken/failed------+
//! ```

use crate::form_return::{
    FIELD_ADDRESS_LINE1, FIELD_AMPHOE, FIELD_DISTRICT, FIELD_FIRST_NAME, FIELD_LAST_NAME,
    FIELD_NUMBER_OF_SIGNERS, FIELD_ORGANIZATION_NAME, FIELD_PHONE_NUMBER, FIELD_PROVINCE,
    FIELD_TYPE, FIELD_ZIPCODE,
};
use crate::image_compression::{compress_image, CompressionOptions};
use crate::regions::{Region, RegionIndex};
use crate::types::DbId;
use crate::upload::{is_allowed_image, ImageSlot};

pub const MSG_UNSUPPORTED_IMAGE: &str = "Only image files are allowed.";
pub const MSG_COMPRESSION_FAILED: &str = "Error compressing image";
pub const MSG_PHONE_IN_USE: &str = "This phone number is already in use.";
pub const MSG_SUBMIT_FAILED: &str = "An error occurred while submitting the form.";
pub const MSG_SUBMITTED: &str = "Form submitted successfully.";

// ---------------------------------------------------------------------------
// Fields and draft
// ---------------------------------------------------------------------------

/// Editable text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    OrganizationName,
    AddressLine1,
    District,
    Amphoe,
    Province,
    Zipcode,
    Type,
    PhoneNumber,
    NumberOfSigners,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::OrganizationName,
        FormField::AddressLine1,
        FormField::District,
        FormField::Amphoe,
        FormField::Province,
        FormField::Zipcode,
        FormField::Type,
        FormField::PhoneNumber,
        FormField::NumberOfSigners,
    ];

    /// Form field name sent to the server.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => FIELD_FIRST_NAME,
            Self::LastName => FIELD_LAST_NAME,
            Self::OrganizationName => FIELD_ORGANIZATION_NAME,
            Self::AddressLine1 => FIELD_ADDRESS_LINE1,
            Self::District => FIELD_DISTRICT,
            Self::Amphoe => FIELD_AMPHOE,
            Self::Province => FIELD_PROVINCE,
            Self::Zipcode => FIELD_ZIPCODE,
            Self::Type => FIELD_TYPE,
            Self::PhoneNumber => FIELD_PHONE_NUMBER,
            Self::NumberOfSigners => FIELD_NUMBER_OF_SIGNERS,
        }
    }
}

/// Raw text of every input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
    pub address_line1: String,
    pub district: String,
    pub amphoe: String,
    pub province: String,
    pub zipcode: String,
    pub region_type: String,
    pub phone_number: String,
    pub number_of_signers: String,
}

impl FormDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::OrganizationName => &self.organization_name,
            FormField::AddressLine1 => &self.address_line1,
            FormField::District => &self.district,
            FormField::Amphoe => &self.amphoe,
            FormField::Province => &self.province,
            FormField::Zipcode => &self.zipcode,
            FormField::Type => &self.region_type,
            FormField::PhoneNumber => &self.phone_number,
            FormField::NumberOfSigners => &self.number_of_signers,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::OrganizationName => &mut self.organization_name,
            FormField::AddressLine1 => &mut self.address_line1,
            FormField::District => &mut self.district,
            FormField::Amphoe => &mut self.amphoe,
            FormField::Province => &mut self.province,
            FormField::Zipcode => &mut self.zipcode,
            FormField::Type => &mut self.region_type,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::NumberOfSigners => &mut self.number_of_signers,
        }
    }
}

/// An image accepted for upload, already compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything the driver needs to post the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPayload {
    /// `(form field name, text)` for every text input, in form order.
    pub fields: Vec<(&'static str, String)>,
    pub image1: Option<SelectedImage>,
    pub image2: Option<SelectedImage>,
}

// ---------------------------------------------------------------------------
// Phases and notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Inputs are mutable.
    Editing,
    /// A phone lookup or create request is in flight.
    Submitting,
    /// The record was created; the view navigates away.
    Submitted { id: DbId },
}

/// Toast-style message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{}", MSG_UNSUPPORTED_IMAGE)]
    UnsupportedImage,

    #[error("{}", MSG_COMPRESSION_FAILED)]
    Compression,

    #[error("No suggestion at position {0}")]
    NoSuchSuggestion(usize),

    #[error("Form cannot be edited while {0:?}")]
    NotEditing(FormPhase),

    #[error("No submission in progress")]
    NotSubmitting,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

pub struct FormEditor<'r> {
    regions: &'r RegionIndex,
    compression: CompressionOptions,
    draft: FormDraft,
    image1: Option<SelectedImage>,
    image2: Option<SelectedImage>,
    suggestions: Vec<Region>,
    phase: FormPhase,
    notice: Option<Notice>,
}

impl<'r> FormEditor<'r> {
    pub fn new(regions: &'r RegionIndex) -> Self {
        Self {
            regions,
            compression: CompressionOptions::default(),
            draft: FormDraft::default(),
            image1: None,
            image2: None,
            suggestions: Vec::new(),
            phase: FormPhase::Editing,
            notice: None,
        }
    }

    pub fn with_compression(mut self, compression: CompressionOptions) -> Self {
        self.compression = compression;
        self
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn suggestions(&self) -> &[Region] {
        &self.suggestions
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&SelectedImage> {
        match slot {
            ImageSlot::Image1 => self.image1.as_ref(),
            ImageSlot::Image2 => self.image2.as_ref(),
        }
    }

    /// Apply a keystroke. Typing in the district field refreshes suggestions.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        let value = value.into();
        if field == FormField::District {
            self.suggestions = self.regions.suggest(&value).to_vec();
        }
        *self.draft.get_mut(field) = value;
        Ok(())
    }

    /// Fill the address fields from the suggestion at `position` and close
    /// the suggestion list.
    pub fn choose_suggestion(&mut self, position: usize) -> Result<(), FormError> {
        self.ensure_editing()?;
        let region = *self
            .suggestions
            .get(position)
            .ok_or(FormError::NoSuchSuggestion(position))?;

        self.draft.district = region.district.to_string();
        self.draft.amphoe = region.amphoe.to_string();
        self.draft.province = region.province.to_string();
        self.draft.zipcode = region.zipcode.to_string();
        self.draft.region_type = region.region_type.to_string();
        self.suggestions.clear();
        Ok(())
    }

    /// Accept a picked file for `slot`.
    ///
    /// Non-image extensions are refused without touching the current
    /// selection. SVG is kept verbatim; raster images are compressed.
    pub fn select_image(
        &mut self,
        slot: ImageSlot,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), FormError> {
        self.ensure_editing()?;
        if !is_allowed_image(file_name) {
            self.notice = Some(Notice::Error(MSG_UNSUPPORTED_IMAGE.to_string()));
            return Err(FormError::UnsupportedImage);
        }

        let selected = if file_name.to_lowercase().ends_with(".svg") {
            SelectedImage {
                file_name: file_name.to_string(),
                bytes,
            }
        } else {
            let compressed = compress_image(&bytes, &self.compression).map_err(|_| {
                self.notice = Some(Notice::Error(MSG_COMPRESSION_FAILED.to_string()));
                FormError::Compression
            })?;
            let file_name = if compressed.recompressed {
                with_extension(file_name, compressed.extension)
            } else {
                file_name.to_string()
            };
            SelectedImage {
                file_name,
                bytes: compressed.bytes,
            }
        };

        *self.slot_mut(slot) = Some(selected);
        Ok(())
    }

    /// Drop the selection in `slot` (the file input was cleared).
    pub fn clear_image(&mut self, slot: ImageSlot) -> Result<(), FormError> {
        self.ensure_editing()?;
        *self.slot_mut(slot) = None;
        Ok(())
    }

    /// Record the result of the lookup run when the phone input loses focus.
    pub fn note_phone_taken(&mut self) {
        self.notice = Some(Notice::Error(MSG_PHONE_IN_USE.to_string()));
    }

    /// Move to `Submitting` and hand out the payload to post.
    pub fn begin_submit(&mut self) -> Result<SubmitPayload, FormError> {
        self.ensure_editing()?;
        self.phase = FormPhase::Submitting;
        self.notice = None;
        Ok(SubmitPayload {
            fields: FormField::ALL
                .iter()
                .map(|&f| (f.name(), self.draft.get(f).to_string()))
                .collect(),
            image1: self.image1.clone(),
            image2: self.image2.clone(),
        })
    }

    /// The phone number turned out to be registered; nothing was created.
    pub fn phone_taken(&mut self) -> Result<(), FormError> {
        self.fail_with(MSG_PHONE_IN_USE)
    }

    /// The submission failed for another reason.
    pub fn submit_failed(&mut self, message: &str) -> Result<(), FormError> {
        self.fail_with(message)
    }

    pub fn submit_succeeded(&mut self, id: DbId) -> Result<(), FormError> {
        self.ensure_submitting()?;
        self.phase = FormPhase::Submitted { id };
        self.notice = Some(Notice::Success(MSG_SUBMITTED.to_string()));
        Ok(())
    }

    fn fail_with(&mut self, message: &str) -> Result<(), FormError> {
        self.ensure_submitting()?;
        self.phase = FormPhase::Editing;
        self.notice = Some(Notice::Error(message.to_string()));
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Editing => Ok(()),
            other => Err(FormError::NotEditing(other)),
        }
    }

    fn ensure_submitting(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Submitting => Ok(()),
            _ => Err(FormError::NotSubmitting),
        }
    }

    fn slot_mut(&mut self, slot: ImageSlot) -> &mut Option<SelectedImage> {
        match slot {
            ImageSlot::Image1 => &mut self.image1,
            ImageSlot::Image2 => &mut self.image2,
        }
    }
}

/// Replace the extension of `file_name` (after the last dot) with `extension`.
fn with_extension(file_name: &str, extension: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    format!("{stem}{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionIndex;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    fn filled_editor(index: &RegionIndex) -> FormEditor<'_> {
        let mut editor = FormEditor::new(index);
        for field in FormField::ALL {
            editor.set_field(field, format!("{}-x", field.name())).unwrap();
        }
        editor.set_field(FormField::NumberOfSigners, "4").unwrap();
        editor
    }

    #[test]
    fn district_typing_updates_suggestions() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        editor.set_field(FormField::District, "Chang").unwrap();
        assert!(!editor.suggestions().is_empty());
        assert!(editor
            .suggestions()
            .iter()
            .all(|r| r.district.starts_with("Chang")));

        editor.set_field(FormField::District, "").unwrap();
        assert!(editor.suggestions().is_empty());
    }

    #[test]
    fn other_fields_leave_suggestions_alone() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        editor.set_field(FormField::District, "Si").unwrap();
        let before = editor.suggestions().len();
        editor.set_field(FormField::Amphoe, "Chang").unwrap();
        assert_eq!(editor.suggestions().len(), before);
    }

    #[test]
    fn choosing_suggestion_fills_address() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        editor.set_field(FormField::District, "Lumph").unwrap();
        editor.choose_suggestion(0).unwrap();

        let draft = editor.draft();
        assert_eq!(draft.district, "Lumphini");
        assert_eq!(draft.amphoe, "Pathum Wan");
        assert_eq!(draft.province, "Bangkok");
        assert_eq!(draft.zipcode, "10330");
        assert_eq!(draft.region_type, "khwaeng");
        assert!(editor.suggestions().is_empty());
    }

    #[test]
    fn choosing_missing_suggestion_fails() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        assert_eq!(
            editor.choose_suggestion(3),
            Err(FormError::NoSuchSuggestion(3))
        );
    }

    #[test]
    fn file_name_without_extension_is_rejected() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        let err = editor
            .select_image(ImageSlot::Image2, "png", tiny_png())
            .unwrap_err();
        assert_eq!(err, FormError::UnsupportedImage);
        assert!(editor.image(ImageSlot::Image2).is_none());
    }

    #[test]
    fn compression_options_bound_selected_image() {
        let big = image::RgbImage::from_pixel(64, 48, image::Rgb([20, 120, 220]));
        let mut data = Vec::new();
        image::DynamicImage::ImageRgb8(big)
            .write_to(&mut std::io::Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();

        let mut editor = FormEditor::new(RegionIndex::embedded()).with_compression(
            CompressionOptions {
                max_bytes: crate::image_compression::DEFAULT_MAX_BYTES,
                max_dimension: 16,
            },
        );
        editor
            .select_image(ImageSlot::Image1, "front.PNG", data)
            .unwrap();

        let selected = editor.image(ImageSlot::Image1).unwrap();
        assert_eq!(selected.file_name, "front.png");
        let stored = image::load_from_memory(&selected.bytes).unwrap();
        assert_eq!(stored.width(), 16);
        assert!(stored.height() <= 16);
    }

    #[test]
    fn non_image_file_is_rejected_locally() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        let err = editor
            .select_image(ImageSlot::Image1, "notes.pdf", b"%PDF".to_vec())
            .unwrap_err();
        assert_eq!(err, FormError::UnsupportedImage);
        assert!(editor.image(ImageSlot::Image1).is_none());
        assert_eq!(
            editor.notice(),
            Some(&Notice::Error(MSG_UNSUPPORTED_IMAGE.to_string()))
        );
    }

    #[test]
    fn corrupt_image_reports_compression_error() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        let err = editor
            .select_image(ImageSlot::Image2, "broken.png", b"nope".to_vec())
            .unwrap_err();
        assert_eq!(err, FormError::Compression);
        assert!(editor.image(ImageSlot::Image2).is_none());
    }

    #[test]
    fn images_are_kept_per_slot() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        editor
            .select_image(ImageSlot::Image2, "front.png", tiny_png())
            .unwrap();
        editor
            .select_image(ImageSlot::Image1, "logo.svg", b"<svg/>".to_vec())
            .unwrap();

        assert_eq!(editor.image(ImageSlot::Image2).unwrap().file_name, "front.png");
        assert_eq!(editor.image(ImageSlot::Image1).unwrap().bytes, b"<svg/>");

        editor.clear_image(ImageSlot::Image2).unwrap();
        assert!(editor.image(ImageSlot::Image2).is_none());
    }

    #[test]
    fn submit_cycle_success() {
        let index = RegionIndex::embedded();
        let mut editor = filled_editor(index);

        let payload = editor.begin_submit().unwrap();
        assert_eq!(editor.phase(), FormPhase::Submitting);
        assert_eq!(payload.fields.len(), FormField::ALL.len());
        assert!(payload
            .fields
            .contains(&(FIELD_NUMBER_OF_SIGNERS, "4".to_string())));

        assert_eq!(
            editor.set_field(FormField::FirstName, "late"),
            Err(FormError::NotEditing(FormPhase::Submitting))
        );

        editor.submit_succeeded(7).unwrap();
        assert_eq!(editor.phase(), FormPhase::Submitted { id: 7 });
        assert_eq!(
            editor.notice(),
            Some(&Notice::Success(MSG_SUBMITTED.to_string()))
        );
    }

    #[test]
    fn phone_taken_returns_to_editing() {
        let index = RegionIndex::embedded();
        let mut editor = filled_editor(index);
        editor.begin_submit().unwrap();
        editor.phone_taken().unwrap();

        assert_eq!(editor.phase(), FormPhase::Editing);
        assert_eq!(
            editor.notice(),
            Some(&Notice::Error(MSG_PHONE_IN_USE.to_string()))
        );
        editor.set_field(FormField::PhoneNumber, "0812345678").unwrap();
    }

    #[test]
    fn outcome_without_submission_is_rejected() {
        let mut editor = FormEditor::new(RegionIndex::embedded());
        assert_eq!(editor.submit_succeeded(1), Err(FormError::NotSubmitting));
        assert_eq!(
            editor.submit_failed(MSG_SUBMIT_FAILED),
            Err(FormError::NotSubmitting)
        );
    }

    #[test]
    fn extension_swap_keeps_stem() {
        assert_eq!(with_extension("scan.png", ".jpg"), "scan.jpg");
        assert_eq!(with_extension("a.b.webp", ".jpg"), "a.b.jpg");
        assert_eq!(with_extension("noext", ".jpg"), "noext.jpg");
    }
}
