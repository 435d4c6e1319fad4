use crate::Result;
use serde::Serialize;
use std::fmt;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}

pub fn escape_html_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let Some(esc) = entity(b) else {
            continue;
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

/// `format!`-friendly escaping without an intermediate allocation.
pub struct EscapeHtml<'a>(pub &'a str);

impl fmt::Display for EscapeHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let mut start = 0usize;
        for (i, b) in text.bytes().enumerate() {
            let Some(esc) = entity(b) else {
                continue;
            };
            f.write_str(&text[start..i])?;
            f.write_str(esc)?;
            start = i + 1;
        }
        f.write_str(&text[start..])
    }
}

fn entity(b: u8) -> Option<&'static str> {
    match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&#39;"),
        _ => None,
    }
}

/// Serializes `value` for embedding inside a `<script>` element.
///
/// `</` is written as `<\/` so data containing `</script>` cannot close the element early.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
