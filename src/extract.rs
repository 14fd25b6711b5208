use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

// ── Constants ────────────────────────────────────────────────────────────────

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
const MAX_IMAGE_BYTES: usize = 100_000;

// ── Lazy static regexes ──────────────────────────────────────────────────────

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"data:image/[a-zA-Z]+;base64,[A-Za-z0-9+/=]+").unwrap());

// ── Public API ───────────────────────────────────────────────────────────────

/// All URL-shaped substrings in order of appearance, duplicates retained.
pub fn extract_references(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The first image data URI in the text, if it survives strict validation.
/// Later matches are never considered.
pub fn extract_chart(text: &str) -> Option<String> {
    let candidate = DATA_URI_RE.find(text)?.as_str();
    is_valid_png_data_uri(candidate).then(|| candidate.to_string())
}

/// Strict check on a data URI candidate: PNG subtype specifically, valid
/// base64 payload, decoded size under 100 000 bytes. The extraction regex is
/// deliberately looser; this is the gate before a chart reaches callers.
pub fn is_valid_png_data_uri(candidate: &str) -> bool {
    let Some(payload) = candidate.strip_prefix(PNG_DATA_URI_PREFIX) else {
        return false;
    };
    match BASE64.decode(payload) {
        Ok(bytes) => bytes.len() < MAX_IMAGE_BYTES,
        Err(_) => false,
    }
}
