//! Text decoding for CSV uploads.
//!
//! Dashboard exports arrive in a handful of encodings depending on which tool
//! produced them. Candidates are tried in a fixed order; the first decoder
//! that accepts the bytes wins. When every candidate rejects the input, the
//! final fallback is lossy UTF-8 with the BOM stripped — CSV ingestion never
//! fails on encoding ambiguity alone.

use encoding_rs::WINDOWS_1252;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One decoding candidate: returns `None` when the bytes are not valid in
/// this encoding.
type Candidate = fn(&[u8]) -> Option<String>;

const CANDIDATES: &[(&str, Candidate)] = &[
    ("utf-8", decode_utf8),
    ("utf-8-bom", decode_utf8_bom),
    ("latin-1", decode_latin1),
];

/// Decode CSV bytes to text, returning the text and the name of the encoding
/// that accepted it. Total: the lossy fallback always produces a result.
pub fn decode_csv_bytes(bytes: &[u8]) -> (String, &'static str) {
    for (name, candidate) in CANDIDATES {
        if let Some(text) = candidate(bytes) {
            return (text, name);
        }
    }
    let text = String::from_utf8_lossy(strip_bom(bytes)).into_owned();
    (text, "utf-8-lossy")
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    // A leading BOM is valid UTF-8 but would end up inside the first header
    // name; let the BOM-aware candidate handle it.
    if bytes.starts_with(UTF8_BOM) {
        return None;
    }
    std::str::from_utf8(bytes).ok().map(str::to_owned)
}

fn decode_utf8_bom(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(UTF8_BOM)?;
    std::str::from_utf8(rest).ok().map(str::to_owned)
}

fn decode_latin1(bytes: &[u8]) -> Option<String> {
    // WINDOWS_1252 is the superset conventionally applied to Latin-1 /
    // ISO-8859-1 spreadsheet exports.
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors { None } else { Some(text.into_owned()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_decodes_strictly() {
        let (text, encoding) = decode_csv_bytes("id,responsável\n".as_bytes());
        assert_eq!(encoding, "utf-8");
        assert_eq!(text, "id,responsável\n");
    }

    #[test]
    fn bom_is_stripped_from_utf8() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"id,status\n");
        let (text, encoding) = decode_csv_bytes(&bytes);
        assert_eq!(encoding, "utf-8-bom");
        assert_eq!(text, "id,status\n");
    }

    #[test]
    fn latin1_bytes_decode_without_error() {
        // "Criação" in ISO-8859-1: e7/e3 are invalid as UTF-8.
        let bytes = b"Cria\xe7\xe3o\n";
        let (text, encoding) = decode_csv_bytes(bytes);
        assert_eq!(encoding, "latin-1");
        assert_eq!(text, "Criação\n");
    }

    #[test]
    fn undecodable_bytes_fall_back_lossily() {
        // 0x81 is undefined in windows-1252 and invalid UTF-8 in this
        // position, so every strict candidate rejects the input.
        let bytes = b"a,\x81b\n";
        let (text, encoding) = decode_csv_bytes(bytes);
        assert_eq!(encoding, "utf-8-lossy");
        assert!(text.contains('\u{FFFD}'));
    }
}
