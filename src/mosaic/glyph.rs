//! Candidate identifier to glyph character conversion
//!
//! Catalog identifiers are sprite filenames in the Noto naming scheme:
//! `emoji_u1f602.svg`, with multi-codepoint glyphs joined by underscores
//! (`emoji_u1f468_200d_1f469.svg`). Conversion strips any directory
//! prefix, the `emoji_u` prefix, and the `.svg` suffix, then decodes each
//! hex part as one Unicode scalar.

use crate::io::configuration::PLACEHOLDER_GLYPH;

/// Decode a sprite filename into its glyph character sequence
///
/// Returns `None` when any part fails to parse as a Unicode scalar.
pub fn identifier_to_glyph(identifier: &str) -> Option<String> {
    let name = identifier.rsplit('/').next().unwrap_or(identifier);
    let name = name.to_lowercase();
    let stem = name.strip_prefix("emoji_u").unwrap_or(&name);
    let stem = stem.strip_suffix(".svg").unwrap_or(stem);

    if stem.is_empty() {
        return None;
    }

    let mut glyph = String::new();
    for part in stem.split('_') {
        let code = u32::from_str_radix(part, 16).ok()?;
        glyph.push(char::from_u32(code)?);
    }
    Some(glyph)
}

/// Decode a sprite filename, falling back to the placeholder glyph
pub fn glyph_or_placeholder(identifier: &str) -> String {
    identifier_to_glyph(identifier).unwrap_or_else(|| PLACEHOLDER_GLYPH.to_string())
}
