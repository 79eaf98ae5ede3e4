//! Byte-order-mark detection and text decoding.
//!
//! ```text
//! EF BB BF  -> UTF-8, BOM stripped
//! FF FE     -> UTF-16 little endian
//! FE FF     -> UTF-16 big endian
//! otherwise -> strict UTF-8
//! ```
use crate::error::IngestError;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Text encoding detected from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
        }
    }
}

/// Detects the encoding and returns it with the BOM-free body.
pub fn detect_encoding(bytes: &[u8]) -> (TextEncoding, &[u8]) {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        (TextEncoding::Utf8, rest)
    } else if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        (TextEncoding::Utf16Le, rest)
    } else if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        (TextEncoding::Utf16Be, rest)
    } else {
        (TextEncoding::Utf8, bytes)
    }
}

/// Decodes `bytes` to a `String`, honouring a leading BOM.
pub fn decode_text(bytes: &[u8]) -> Result<(TextEncoding, String), IngestError> {
    let (encoding, body) = detect_encoding(bytes);
    let text = match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(|e| IngestError::InvalidEncoding(e.to_string()))?,
        TextEncoding::Utf16Le => decode_utf16(body, u16::from_le_bytes)?,
        TextEncoding::Utf16Be => decode_utf16(body, u16::from_be_bytes)?,
    };
    Ok((encoding, text))
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, IngestError> {
    if body.len() % 2 != 0 {
        return Err(IngestError::InvalidEncoding(
            "odd number of bytes in UTF-16 content".into(),
        ));
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| IngestError::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut out = UTF16_LE_BOM.to_vec();
        for unit in text.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn plain_utf8() {
        let (enc, text) = decode_text("héllo".as_bytes()).expect("valid utf-8");
        assert_eq!(enc, TextEncoding::Utf8);
        assert_eq!(text, "héllo");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"a b a");
        let (enc, text) = decode_text(&bytes).expect("valid utf-8");
        assert_eq!(enc, TextEncoding::Utf8);
        assert_eq!(text, "a b a");
    }

    #[test]
    fn utf16_le_decoded() {
        let (enc, text) = decode_text(&utf16le_with_bom("привіт світ")).expect("valid utf-16");
        assert_eq!(enc, TextEncoding::Utf16Le);
        assert_eq!(text, "привіт світ");
    }

    #[test]
    fn utf16_be_decoded() {
        let mut bytes = UTF16_BE_BOM.to_vec();
        for unit in "ok".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let (enc, text) = decode_text(&bytes).expect("valid utf-16");
        assert_eq!(enc, TextEncoding::Utf16Be);
        assert_eq!(text, "ok");
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = decode_text(&[0x61, 0xC3, 0x28]).expect_err("invalid utf-8");
        assert!(matches!(err, IngestError::InvalidEncoding(_)));
    }

    #[test]
    fn odd_utf16_length_rejected() {
        let err = decode_text(&[0xFF, 0xFE, 0x61]).expect_err("truncated utf-16");
        assert!(matches!(err, IngestError::InvalidEncoding(_)));
    }
}
