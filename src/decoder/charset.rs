//! Picks the character encoding of a feed document.
//!
//! Order of precedence: byte-order mark, the XML declaration, the HTTP
//! `Content-Type` charset, then UTF-8.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::decoder::DecodeError;

/// How far into the document to look for the XML declaration.
const DECLARATION_WINDOW: usize = 1024;

pub fn detect_encoding(
    body: &[u8],
    content_type: Option<&str>,
) -> Result<&'static Encoding, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return Ok(encoding);
    }

    let label = declared_encoding(body).or_else(|| content_type.and_then(charset_param));
    let Some(label) = label else {
        return Ok(UTF_8);
    };

    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DecodeError::UnknownCharset(label.clone()))?;

    // Without a BOM we could only read the label if the bytes are
    // ASCII-compatible, so a UTF-16 label is a lie.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(UTF_8);
    }
    Ok(encoding)
}

/// Transcode `body` to UTF-8. Malformed sequences become U+FFFD.
pub fn transcode<'a>(
    body: &'a [u8],
    content_type: Option<&str>,
) -> Result<Cow<'a, str>, DecodeError> {
    let encoding = detect_encoding(body, content_type)?;
    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!(encoding = used.name(), "Replaced malformed byte sequences");
    }
    Ok(text)
}

/// The `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration.
fn declared_encoding(body: &[u8]) -> Option<String> {
    let window = &body[..body.len().min(DECLARATION_WINDOW)];
    let start = window.iter().position(|b| !b.is_ascii_whitespace())?;
    let window = &window[start..];
    if !window.starts_with(b"<?xml") {
        return None;
    }

    let end = window.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&window[..end]).ok()?;

    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let close = value.find(quote)?;
    Some(value[..close].to_string())
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}
