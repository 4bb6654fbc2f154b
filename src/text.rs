//! HTML entity handling of Tweet texts and user descriptions.
//!
//! The API returns `text` and `description` with `&`, `<` and `>` escaped as HTML entities, while
//! the spans of the entities annotating those texts count characters of the escaped text. Unescaping
//! a text therefore requires sliding every span that points into it.

use std::borrow::Cow;

use tracing::trace;

use crate::entities::TextSpan;

// Longest name between `&` and `;` considered as an entity candidate.
const MAX_ENTITY_LEN: usize = 32;

/// Maps character offsets of a text before a transformation to offsets after it.
#[derive(Debug)]
struct OffsetMap {
    // `map[i]` is the new offset of the old offset `i`, for `i` in `0..=old_len`.
    map: Vec<usize>,
    old_len: usize,
    new_len: usize,
}

impl OffsetMap {
    fn translate(&self, offset: usize) -> usize {
        match self.map.get(offset) {
            Some(&o) => o,
            // Past the end of the text: keep the distance from its end.
            None => (offset - self.old_len).saturating_add(self.new_len),
        }
    }

    fn apply<'a, I>(&self, spans: I)
    where
        I: IntoIterator<Item = &'a mut TextSpan>,
    {
        for span in spans {
            let slid = TextSpan::new(self.translate(span.start), self.translate(span.end));
            if slid != *span {
                trace!(from = ?*span, to = ?slid, "sliding entity span");
                *span = slid;
            }
        }
    }
}

/// Unescapes the HTML entities in `text`, moving each of `spans` so that it locates the same
/// characters in the unescaped text as it did in `text`.
///
/// An offset at or after the end of an escape sequence shifts left by the length lost by
/// unescaping it, and an offset before it is left unchanged. Sequences that are not
/// recognized as HTML entities are left as they are.
pub fn unescape_and_slide<'a, I>(text: &str, spans: I) -> String
where
    I: IntoIterator<Item = &'a mut TextSpan>,
{
    if !text.contains('&') {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut unescaped = String::with_capacity(text.len());
    let mut new_len = 0;
    let mut map = Vec::with_capacity(chars.len() + 1);

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '&' {
            if let Some((decoded, seq_len)) = decode_entity_at(&chars[i..]) {
                map.push(new_len);
                new_len += decoded.chars().count();
                unescaped.push_str(&decoded);
                // Offsets inside of the escape sequence point to the character after it.
                map.extend(std::iter::repeat(new_len).take(seq_len - 1));
                i += seq_len;
                continue;
            }
        }
        map.push(new_len);
        unescaped.push(chars[i]);
        new_len += 1;
        i += 1;
    }
    map.push(new_len);

    let offsets = OffsetMap {
        map,
        old_len: chars.len(),
        new_len,
    };
    offsets.apply(spans);

    unescaped
}

/// Escapes `&`, `<` and `>` in `text` as HTML entities, moving each of `spans` along.
///
/// This is the inverse of `unescape_and_slide` for texts returned by it.
pub fn escape_and_slide<'a, I>(text: &str, spans: I) -> String
where
    I: IntoIterator<Item = &'a mut TextSpan>,
{
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>')) {
        return text.to_owned();
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    let mut new_len = 0;
    let mut map = Vec::new();
    let mut old_len = 0;

    for c in text.chars() {
        map.push(new_len);
        old_len += 1;
        let seq = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            _ => {
                escaped.push(c);
                new_len += 1;
                continue;
            }
        };
        escaped.push_str(seq);
        new_len += seq.len();
    }
    map.push(new_len);

    OffsetMap {
        map,
        old_len,
        new_len,
    }
    .apply(spans);

    escaped
}

/// Decodes the entity at the head of `chars` (which starts with `&`), returning the decoded
/// string and the number of characters of the escape sequence.
fn decode_entity_at(chars: &[char]) -> Option<(String, usize)> {
    let semicolon = chars
        .iter()
        .take(MAX_ENTITY_LEN + 2)
        .skip(1)
        .position(|&c| c == ';')?
        + 1;
    let name = &chars[1..semicolon];
    if name.is_empty() || !name.iter().all(|c| c.is_ascii_alphanumeric() || *c == '#') {
        return None;
    }

    let seq: String = chars[..=semicolon].iter().collect();
    match html_escape::decode_html_entities(&seq) {
        Cow::Owned(decoded) if decoded != seq => Some((decoded, semicolon + 1)),
        _ => None,
    }
}
