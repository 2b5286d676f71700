use crate::error::{Error, Result};

pub const COVER_LETTER_MIN: usize = 20;
pub const COVER_LETTER_MAX: usize = 5000;

/// Cover letters are optional, but when present must fall inside the
/// 20-5000 character window (inclusive, counted in characters).
pub fn validate_cover_letter(text: &str) -> Result<()> {
    let len = text.chars().count();
    if len < COVER_LETTER_MIN || len > COVER_LETTER_MAX {
        return Err(Error::InvalidCoverLetter);
    }
    Ok(())
}

/// Resumes must be PDFs. The declared content type is checked first, then
/// the magic bytes, since browsers occasionally send `application/octet-stream`
/// for perfectly good files.
pub fn require_pdf(content_type: Option<&str>, data: &[u8]) -> Result<()> {
    if let Some(ct) = content_type {
        if !ct.eq_ignore_ascii_case("application/pdf") {
            return Err(Error::InvalidFileType(
                "Only PDF resumes are accepted".to_string(),
            ));
        }
    }
    if !data.starts_with(b"%PDF") {
        return Err(Error::InvalidFileType(
            "Uploaded file is not a valid PDF".to_string(),
        ));
    }
    Ok(())
}

/// Logos and profile photos: PNG, JPEG or WebP, verified by magic bytes.
pub fn require_image(data: &[u8]) -> Result<()> {
    let is_png = data.starts_with(&[0x89, 0x50, 0x4E, 0x47]);
    let is_jpeg = data.starts_with(&[0xFF, 0xD8]);
    let is_webp = data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP";
    if !(is_png || is_jpeg || is_webp) {
        return Err(Error::InvalidFileType(
            "Only PNG, JPEG and WebP images are accepted".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_letter_window_is_inclusive() {
        assert!(validate_cover_letter(&"a".repeat(19)).is_err());
        assert!(validate_cover_letter(&"a".repeat(20)).is_ok());
        assert!(validate_cover_letter(&"a".repeat(5000)).is_ok());
        assert!(validate_cover_letter(&"a".repeat(5001)).is_err());
    }

    #[test]
    fn cover_letter_counts_characters_not_bytes() {
        // 20 multi-byte characters is valid even though it is 60 bytes.
        let letter = "\u{00e9}".repeat(20);
        assert!(validate_cover_letter(&letter).is_ok());
    }

    #[test]
    fn pdf_check_requires_content_type_and_magic() {
        let pdf = b"%PDF-1.7 ...";
        assert!(require_pdf(Some("application/pdf"), pdf).is_ok());
        assert!(require_pdf(None, pdf).is_ok());
        assert!(require_pdf(Some("image/png"), pdf).is_err());
        assert!(require_pdf(Some("application/pdf"), b"not a pdf").is_err());
    }

    #[test]
    fn image_check_accepts_known_magics() {
        assert!(require_image(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]).is_ok());
        assert!(require_image(&[0xFF, 0xD8, 0xFF, 0xE0]).is_ok());
        assert!(require_image(b"RIFF\x00\x00\x00\x00WEBPVP8 ").is_ok());
        assert!(require_image(b"GIF89a").is_err());
    }
}
