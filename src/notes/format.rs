// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text edits over `(content, selection)` pairs.
//!
//! Offsets count Unicode scalar values, not bytes, so they line up with what a text widget
//! reports as a cursor position.

/// A selection range in the notes text. `start == end` is a bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Orders the bounds and clamps them to `len` characters.
    pub fn normalized(self, len: usize) -> Self {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: start.min(len),
            end: end.min(len),
        }
    }
}

/// The result of an edit: the new text and where the caret goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub content: String,
    pub caret: usize,
}

/// Wraps the selected text in `before`/`after`.
///
/// With a selection the caret lands right after `after`. With a bare caret both markers are
/// inserted at the caret and the caret lands at the end of the inserted text.
pub fn wrap_selection(
    content: &str,
    selection: TextSelection,
    before: &str,
    after: &str,
) -> TextEdit {
    let selection = selection.normalized(content.chars().count());
    let (head, selected, tail) = split(content, selection);

    let mut out = String::with_capacity(content.len() + before.len() + after.len());
    out.push_str(head);
    out.push_str(before);
    out.push_str(selected);
    out.push_str(after);
    out.push_str(tail);

    let caret = selection.start
        + before.chars().count()
        + selected.chars().count()
        + after.chars().count();
    TextEdit {
        content: out,
        caret,
    }
}

/// Replaces the selection (or inserts at the caret) with `text`; the caret ends after it.
pub fn insert_at(content: &str, selection: TextSelection, text: &str) -> TextEdit {
    let selection = selection.normalized(content.chars().count());
    let (head, _, tail) = split(content, selection);

    let mut out = String::with_capacity(head.len() + text.len() + tail.len());
    out.push_str(head);
    out.push_str(text);
    out.push_str(tail);

    TextEdit {
        content: out,
        caret: selection.start + text.chars().count(),
    }
}

fn split(content: &str, selection: TextSelection) -> (&str, &str, &str) {
    let start = byte_offset(content, selection.start);
    let end = byte_offset(content, selection.end);
    (&content[..start], &content[start..end], &content[end..])
}

fn byte_offset(content: &str, chars: usize) -> usize {
    content
        .char_indices()
        .nth(chars)
        .map_or(content.len(), |(offset, _)| offset)
}
