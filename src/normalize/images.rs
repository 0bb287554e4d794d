//! Image placeholder resolution.
//!
//! The extraction backend leaves one `<!-- image -->` placeholder per
//! picture in the exported markdown, in document order. This stage pairs
//! placeholders with resolved image references positionally and rewrites
//! them as markdown image links. It never fails: placeholders without a
//! matching image degrade to a stable numbered fallback.

use crate::model::ImageRef;
use crate::normalize::text::escape_markdown_alt;

/// Inline image placeholder token emitted by the extraction backend.
pub const IMAGE_PLACEHOLDER: &str = "<!-- image -->";

/// Substitute image placeholders with resolved image references.
///
/// The k-th placeholder (1-based) takes the k-th image reference; extra
/// placeholders become `![image_NNN](#image_NNN)` so the marker position
/// is never silently dropped.
pub fn resolve_image_placeholders(markdown: &str, images: &[ImageRef]) -> String {
    let parts: Vec<&str> = markdown.split(IMAGE_PLACEHOLDER).collect();
    if parts.len() == 1 {
        return markdown.to_string();
    }

    if parts.len() - 1 > images.len() {
        log::warn!(
            "{} image placeholders but only {} resolved images; using fallback references",
            parts.len() - 1,
            images.len()
        );
    }

    let mut output = String::with_capacity(markdown.len());
    for (idx, part) in parts[..parts.len() - 1].iter().enumerate() {
        let occurrence = idx + 1;
        output.push_str(part);
        match images.get(idx) {
            Some(image) => {
                let alt = escape_markdown_alt(&image.alt);
                output.push_str(&format!("![{}]({})", alt, image.relative_path));
            }
            None => {
                output.push_str(&format!(
                    "![image_{occ:03}](#image_{occ:03})",
                    occ = occurrence
                ));
            }
        }
    }
    output.push_str(parts[parts.len() - 1]);
    output
}
