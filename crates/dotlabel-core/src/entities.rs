//! Entity helpers shared by the label parser and the text builder.

use std::borrow::Cow;

const XML_ENTITIES: [&str; 5] = ["lt", "gt", "amp", "quot", "apos"];

/// Decodes HTML character references (named and numeric) into Unicode.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    htmlize::unescape(text)
}

/// Re-encodes the characters that would otherwise be read back as markup.
pub fn encode_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Raw control characters never reach a line: breaks come from `<BR/>` only.
pub fn is_stripped_control(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if !text.contains(is_stripped_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !is_stripped_control(*c)).collect())
}

/// Rewrites named HTML entities that XML does not predefine (`&nbsp;`, `&copy;`, ...) into
/// numeric character references so the fragment can be read by an XML parser.
///
/// Unknown names are left untouched; the XML parser reports them.
pub fn xml_safe_entities(src: &str) -> Cow<'_, str> {
    if !src.contains('&') {
        return Cow::Borrowed(src);
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let name_len = tail[1..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(tail.len() - 1);
        let name = &tail[1..1 + name_len];
        let terminated = tail[1 + name_len..].starts_with(';');

        if name.is_empty() || !terminated || XML_ENTITIES.contains(&name) {
            out.push('&');
            rest = &tail[1..];
            continue;
        }

        let reference = &tail[..name_len + 2];
        let decoded = htmlize::unescape(reference);
        if decoded == reference {
            out.push_str(reference);
        } else {
            for ch in decoded.chars() {
                out.push_str(&format!("&#{};", ch as u32));
            }
        }
        rest = &tail[name_len + 2..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}
