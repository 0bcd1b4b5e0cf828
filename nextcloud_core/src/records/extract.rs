//! Line scanning helpers shared by the event and contact codecs.
//!
//! This is a best-effort extractor for single-line, unfolded properties.
//! Folded lines, multi-valued properties and quoted colons inside
//! parameters are not understood.

use std::sync::LazyLock;

use regex::Regex;

use super::LINE_TERMINATOR;

static FRACTIONAL_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+").expect("valid fractional seconds pattern"));

/// Returns the unescaped contents of every `<prefix:element>` in a
/// multistatus body, in document order.
pub fn data_blocks(pattern: &Regex, xml: &str) -> Vec<String> {
    pattern
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape_xml(m.as_str()))
        .collect()
}

/// Builds the block pattern for an element such as `calendar-data`,
/// accepting any namespace prefix.
///
/// Self-closing elements carry no data and never open a block.
pub(crate) fn block_pattern(element: &str) -> Regex {
    let pattern = format!(
        r"(?is)<(?:[\w.-]+:)?{element}(?:\s[^>]*[^>/])?\s*>(.*?)</(?:[\w.-]+:)?{element}\s*>"
    );
    Regex::new(&pattern).expect("valid data block pattern")
}

/// Reverses the XML escaping applied to text content.
///
/// `&amp;` is handled last so `&amp;lt;` decodes to `&lt;` and not `<`.
pub fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#13;", "\r")
        .replace("&#xD;", "\r")
        .replace("&amp;", "&")
}

/// Value of the first line that starts with `key`, optionally followed by
/// `;parameters`, then a colon. Empty values count as absent.
pub fn field<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?;
        if !(rest.starts_with(':') || rest.starts_with(';')) {
            return None;
        }
        let (_, value) = rest.split_once(':')?;
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    })
}

/// Like [`field`] for free text properties: escaped line breaks are
/// turned back into newlines.
pub fn text_field(text: &str, key: &str) -> Option<String> {
    field(text, key).map(unescape_value)
}

/// The text of the first `BEGIN:<name>` .. `END:<name>` component, or the
/// whole text when the component is not present.
pub fn component<'a>(text: &'a str, name: &str) -> &'a str {
    let begin = format!("BEGIN:{}", name);
    let end = format!("END:{}", name);

    let Some(start) = text.find(&begin) else {
        return text;
    };
    match text[start..].find(&end) {
        Some(len) => &text[start..start + len + end.len()],
        None => &text[start..],
    }
}

/// Compacts an ISO 8601 timestamp into iCalendar basic form:
/// `2024-01-15T10:00:00.000Z` becomes `20240115T100000Z`.
pub fn compact_timestamp(value: &str) -> String {
    FRACTIONAL_SECONDS
        .replace(value.trim(), "")
        .replace(['-', ':'], "")
}

/// Escapes line breaks so a value always stays on one line.
pub fn escape_value(value: &str) -> String {
    value
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

/// Reverses [`escape_value`].
pub fn unescape_value(value: &str) -> String {
    value.replace("\\n", "\n").replace("\\N", "\n")
}

/// Emits a record from an ordered table of `(key, value)` pairs.
///
/// Fields with a `None` value are skipped, so optional properties appear
/// only when set while the output order stays fixed.
pub(crate) fn write_record(kind: &str, fields: &[(&str, Option<String>)]) -> String {
    let mut lines = Vec::with_capacity(fields.len() + 2);
    lines.push(format!("BEGIN:{}", kind));
    for (key, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{}:{}", key, value));
        }
    }
    lines.push(format!("END:{}", kind));
    lines.join(LINE_TERMINATOR)
}
