//! Query Parser
//!
//! Cursor-aware decomposition of a free-text item query such as
//! `color=red & (size>3 | name=R1)` into the key/value clause being edited.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::suggest::{Completion, SuggestionState};

/// The clause under the cursor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryCursor {
    pub key: String,
    /// `None` while the user is still typing the key
    pub value: Option<String>,
    /// Byte range a completion replaces
    pub replace: Range<usize>,
}

impl QueryCursor {
    /// Text the suggestions are filtered against
    pub fn fragment(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.key)
    }

    fn same_slot(&self, other: &QueryCursor) -> bool {
        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(_), Some(_)) => self.key == other.key,
            _ => false,
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '&' | '|' | '(' | ')' | ',')
}

/// First unescaped separator as a byte range
fn find_separator(text: &str) -> Option<Range<usize>> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if is_separator(c) && !escaped {
            return Some(i..i + c.len_utf8());
        }
        escaped = c == '\\';
    }
    None
}

/// Leftmost comparator, preferring `<=`/`>=` over `<`/`>`
fn find_comparator(text: &str) -> Option<Range<usize>> {
    for (i, c) in text.char_indices() {
        let rest = &text[i..];
        if rest.starts_with("<=") || rest.starts_with(">=") {
            return Some(i..i + 2);
        }
        if matches!(c, '=' | '<' | '>') {
            return Some(i..i + 1);
        }
    }
    None
}

/// Decompose `text` around `cursor` (a byte offset, clamped to the text).
pub fn parse_query(text: &str, cursor: usize) -> QueryCursor {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }

    // Narrow down to the clause containing the cursor
    let mut start = 0;
    let mut end = text.len();
    while let Some(sep) = find_separator(&text[start..end]) {
        if cursor - start <= sep.start {
            end = start + sep.start;
            break;
        }
        start += sep.end;
    }
    let clause = &text[start..end];
    let local = cursor - start;

    let Some(cmp) = find_comparator(clause) else {
        return QueryCursor {
            key: clause.trim().to_string(),
            value: None,
            replace: start..end,
        };
    };

    let key = clause[..cmp.start].trim().to_string();
    if local <= cmp.start {
        QueryCursor {
            key,
            value: None,
            replace: start..start + cmp.start,
        }
    } else if local < cmp.end {
        log::error!("cursor inside comparator at {}", cursor);
        QueryCursor {
            key,
            value: None,
            replace: start..end,
        }
    } else {
        QueryCursor {
            key,
            value: Some(clause[cmp.end..].trim().to_string()),
            replace: start + cmp.end..end,
        }
    }
}

/// Splice `replacement` into `range`. `None` when nothing would change.
pub fn replace_fragment(text: &str, range: &Range<usize>, replacement: &str) -> Option<String> {
    let head = text.get(..range.start)?;
    let tail = text.get(range.end..)?;
    let updated = format!("{}{}{}", head, replacement, tail);
    (updated != text).then_some(updated)
}

/// Convert a browser selection offset (UTF-16 units) to a byte index
pub fn utf16_to_byte(text: &str, pos_utf16: u32) -> usize {
    let mut acc: u32 = 0;
    for (i, ch) in text.char_indices() {
        if acc >= pos_utf16 {
            return i;
        }
        acc += ch.len_utf16() as u32;
    }
    text.len()
}

pub fn byte_to_utf16(text: &str, byte_idx: usize) -> u32 {
    text[..byte_idx.min(text.len())].encode_utf16().count() as u32
}

/// Search bar state: query text, parsed clause and suggestion vocabulary
#[derive(Debug, Clone, Default)]
pub struct QueryAssist {
    text: String,
    cursor: QueryCursor,
    pub suggestions: SuggestionState,
    common_keys: Vec<String>,
    common_values: HashMap<String, Vec<String>>,
    pending: HashSet<String>,
    requests: Vec<String>,
}

impl QueryAssist {
    /// Start from an initial query with the cursor at its end
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: parse_query(text, text.len()),
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> &QueryCursor {
        &self.cursor
    }

    /// Update text and cursor (a byte offset)
    pub fn set_query(&mut self, text: &str, cursor: usize) {
        let previous = std::mem::replace(&mut self.cursor, parse_query(text, cursor));
        self.text = text.to_string();
        self.suggestions.show();
        self.refresh(Some(&previous));
    }

    /// Keys whose common values must be fetched, each handed out once
    pub fn take_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.requests)
    }

    fn refresh(&mut self, previous: Option<&QueryCursor>) {
        let source: &[String] = match &self.cursor.value {
            None => &self.common_keys,
            Some(_) => match self.common_values.get(&self.cursor.key) {
                Some(values) => values,
                None => {
                    if self.pending.insert(self.cursor.key.clone()) {
                        self.requests.push(self.cursor.key.clone());
                    }
                    &[]
                }
            },
        };

        let previous_fragment = previous
            .filter(|p| p.same_slot(&self.cursor))
            .map(QueryCursor::fragment);
        if previous_fragment == Some(self.cursor.fragment()) && self.suggestions.options.is_some() {
            return;
        }
        self.suggestions
            .refilter(source, previous_fragment, self.cursor.fragment());
    }

    pub fn receive_keys(&mut self, keys: Vec<String>) {
        self.common_keys = keys;
        self.refresh(None);
    }

    /// Cache a key's values. Empty answers are not cached.
    pub fn receive_values(&mut self, key: &str, values: Vec<String>) {
        self.pending.remove(key);
        if values.is_empty() {
            return;
        }
        self.common_values.insert(key.to_string(), values);
        if self.cursor.value.is_some() && self.cursor.key == key {
            self.refresh(None);
        }
    }

    pub fn forget_pending(&mut self, key: &str) {
        self.pending.remove(key);
    }
}

impl Completion for QueryAssist {
    fn text(&self) -> &str {
        &self.text
    }

    fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut SuggestionState {
        &mut self.suggestions
    }

    fn caret(&self) -> usize {
        self.cursor.replace.end
    }

    /// Replace the clause fragment with the highlighted suggestion.
    /// Returns whether the query text changed.
    fn complete(&mut self) -> bool {
        let Some(chosen) = self.suggestions.selected().map(str::to_string) else {
            return false;
        };
        let range = self.cursor.replace.clone();
        let Some(updated) = replace_fragment(&self.text, &range, &chosen) else {
            return false;
        };
        self.set_query(&updated, range.start + chosen.len());
        self.suggestions.hide();
        true
    }
}
