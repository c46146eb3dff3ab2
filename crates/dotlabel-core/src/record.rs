//! Record label fields (`shape=record` / `Mrecord`).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordField {
    /// A text field. `text` keeps the `\n`, `\l` and `\r` line codes verbatim.
    Leaf { port: Option<String>, text: String },
    Group { fields: Vec<RecordField> },
}

impl RecordField {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf {
            port: None,
            text: text.into(),
        }
    }

    pub fn group(fields: impl IntoIterator<Item = RecordField>) -> Self {
        Self::Group {
            fields: fields.into_iter().collect(),
        }
    }
}

/// Parses a record label.
///
/// The result is always a [`RecordField::Group`] holding the top-level fields.
pub fn parse_record_label(src: &str) -> Result<RecordField> {
    let mut parser = RecordParser { src, pos: 0 };
    let fields = parser.parse_fields(0)?;
    if parser.pos < src.len() {
        return Err(parser.error("unmatched `}`"));
    }
    Ok(RecordField::Group { fields })
}

/// Deepest accepted `{...}` nesting.
pub const MAX_RECORD_DEPTH: usize = 256;

struct RecordParser<'a> {
    src: &'a str,
    pos: usize,
}

impl RecordParser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::RecordParse {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn parse_fields(&mut self, depth: usize) -> Result<Vec<RecordField>> {
        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_field(depth)?);
            match self.peek() {
                Some('|') => {
                    self.bump();
                }
                _ => return Ok(fields),
            }
        }
    }

    fn parse_field(&mut self, depth: usize) -> Result<RecordField> {
        self.skip_ws();
        if self.peek() == Some('{') {
            if depth >= MAX_RECORD_DEPTH {
                return Err(self.error("fields nested too deeply"));
            }
            self.bump();
            let fields = self.parse_fields(depth + 1)?;
            if self.bump() != Some('}') {
                return Err(self.error("missing `}`"));
            }
            self.skip_ws();
            return Ok(RecordField::Group { fields });
        }

        let mut port = None;
        if self.peek() == Some('<') {
            self.bump();
            let name = self.read_text(&['>'])?;
            if self.bump() != Some('>') {
                return Err(self.error("missing `>` after port name"));
            }
            port = Some(name);
        }

        let text = self.read_text(&['|', '}'])?;
        Ok(RecordField::Leaf { port, text })
    }

    /// Reads until an unescaped stop character, unescaping the record metacharacters.
    ///
    /// Surrounding whitespace is trimmed unless it was escaped (`\ `).
    fn read_text(&mut self, stops: &[char]) -> Result<String> {
        let mut out = String::new();
        // Byte range of `out` holding escaped characters, which trimming must not touch.
        let mut escaped: Option<(usize, usize)> = None;
        while let Some(ch) = self.peek() {
            if stops.contains(&ch) {
                break;
            }
            match ch {
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(c @ ('{' | '}' | '|' | '<' | '>' | ' ')) => {
                            let at = out.len();
                            out.push(c);
                            let first = escaped.map_or(at, |(first, _)| first);
                            escaped = Some((first, out.len()));
                        }
                        // Line codes and `\\` are resolved by the layout translator.
                        Some(c) => {
                            out.push('\\');
                            out.push(c);
                        }
                        None => out.push('\\'),
                    }
                }
                '{' => return Err(self.error("unexpected `{` inside a field")),
                '<' => return Err(self.error("unexpected `<` inside a field")),
                _ => {
                    self.bump();
                    out.push(ch);
                }
            }
        }

        let mut start = out.len() - out.trim_start().len();
        let mut end = out.trim_end().len();
        if let Some((first, last)) = escaped {
            start = start.min(first);
            end = end.max(last);
        }
        if start >= end {
            return Ok(String::new());
        }
        Ok(out[start..end].to_string())
    }
}
