//! Offset to line/column conversion

use pegfront_ast::{Position, SourceTag, Span};

use crate::trivia::line_terminator_sequence;

/// Converts byte offsets into [`Position`]s.
///
/// Line starts are discovered lazily, only as far as the largest offset
/// requested so far, and cached. Later lookups at or behind that point are
/// a binary search. Columns are counted on from the previous lookup when it
/// sits earlier on the same line.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    source: &'a str,
    tag: SourceTag,
    line_starts: Vec<usize>,
    scanned: usize,
    /// Offset and column of the previous lookup
    last: (usize, usize),
}

impl<'a> Locator<'a> {
    pub fn new(source: &'a str, tag: SourceTag) -> Self {
        Self {
            source,
            tag,
            line_starts: vec![0],
            scanned: 0,
            last: (0, 1),
        }
    }

    fn scan_to(&mut self, offset: usize) {
        while self.scanned < offset {
            let Some(c) = self.source[self.scanned..].chars().next() else {
                break;
            };
            match line_terminator_sequence(self.source, self.scanned) {
                Some(next) => {
                    self.line_starts.push(next);
                    self.scanned = next;
                }
                None => self.scanned += c.len_utf8(),
            }
        }
    }

    pub fn position(&mut self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        self.scan_to(offset);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        // An offset between CR and LF still belongs to the line the CR ends.
        let (last_offset, last_column) = self.last;
        let column = if (line_start..=offset).contains(&last_offset) {
            last_column + self.source[last_offset..offset].chars().count()
        } else {
            self.source[line_start..offset].chars().count() + 1
        };
        self.last = (offset, column);
        Position::new(offset, line, column)
    }

    pub fn span(&mut self, start: usize, end: usize) -> Span {
        let start = self.position(start);
        let end = self.position(end);
        Span::new(self.tag.clone(), start, end)
    }
}
