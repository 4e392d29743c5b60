//! Content type detection for uploaded files

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes are inspected
const SNIFF_LEN: u64 = 8192;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";
pub const IMAGE_SVG: &str = "image/svg+xml";

/// Detects the MIME type of a file from its content
///
/// Implementations may return parameters (`text/plain;charset=utf-8`);
/// callers strip them before comparing.
pub trait ContentSniffer: Send + Sync {
    fn detect(&self, path: &Path) -> Result<String>;
}

/// Magic-number sniffer backed by `infer`
///
/// Text whose root element is `<svg` is reported as `image/svg+xml`.
/// Content without a known signature is reported as UTF-8 text when it
/// decodes as such and as `application/octet-stream` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSniffer;

impl MagicSniffer {
    pub fn new() -> Self {
        Self
    }

    pub fn detect_bytes(&self, bytes: &[u8]) -> String {
        let text = as_text(bytes);

        // infer reports an xml prolog as text/xml
        if text.is_some_and(has_svg_root) {
            return IMAGE_SVG.to_string();
        }

        if let Some(kind) = infer::get(bytes) {
            return kind.mime_type().to_string();
        }

        match text {
            Some(text) if !text.is_empty() => TEXT_PLAIN_UTF8.to_string(),
            _ => OCTET_STREAM.to_string(),
        }
    }
}

fn as_text(bytes: &[u8]) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        // a multi-byte character cut off by the sniff window is still text
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&bytes[..e.valid_up_to()]).ok(),
        Err(_) => None,
    }
}

/// Skips the prolog, comments and doctype before checking the root tag
fn has_svg_root(text: &str) -> bool {
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();

    loop {
        let end = if rest.starts_with("<?") {
            rest.find("?>").map(|i| i + 2)
        } else if rest.starts_with("<!--") {
            rest.find("-->").map(|i| i + 3)
        } else if rest.starts_with("<!") {
            rest.find('>').map(|i| i + 1)
        } else {
            break;
        };

        match end {
            Some(end) => rest = rest[end..].trim_start(),
            None => return false,
        }
    }

    rest.strip_prefix("<svg")
        .and_then(|tail| tail.chars().next())
        .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
}

impl ContentSniffer for MagicSniffer {
    fn detect(&self, path: &Path) -> Result<String> {
        let mut head = Vec::new();
        File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
        Ok(self.detect_bytes(&head))
    }
}
