use anyhow::{anyhow, Context};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::path::Path;

/// Sniffs the image type from magic bytes. Only formats a browser renders
/// inline are accepted.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Converts one selected image file into a self-contained `data:` URI, the
/// value stored verbatim in a student's photo field. This runs to completion
/// before the student record is constructed; there is no deferred callback.
pub fn encode_photo(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read photo file {}", path.to_string_lossy()))?;
    let mime = sniff_mime(&bytes).ok_or_else(|| {
        anyhow!(
            "unrecognized image format: {}",
            path.to_string_lossy()
        )
    })?;
    Ok(format!("data:{};base64,{}", mime, B64.encode(&bytes)))
}
