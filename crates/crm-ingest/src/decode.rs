//! Byte-to-text decoding.

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::error::{IngestError, Result};

/// Decode file bytes as UTF-8, falling back to Windows-1252.
///
/// A UTF-8 BOM is stripped. UTF-16 input (detected by BOM) is refused.
pub fn decode_text(name: &str, bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 BE",
        });
    }

    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Ok(text.into_owned());
    }

    tracing::warn!(
        file = name,
        "input is not valid UTF-8, decoding as Windows-1252"
    );
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}
