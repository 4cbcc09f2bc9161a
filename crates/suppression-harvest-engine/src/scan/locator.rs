use super::range::LineRange;

/// Placeholder the diagnostic tool prints where a suppression name belongs.
pub const MARKER: &str = "<insert a suppression name here>";
/// Opening delimiter, expected on the line right before the marker.
pub const OPEN: &str = "{";
/// Closing delimiter, expected somewhere after the marker.
pub const CLOSE: &str = "}";

/// Boundaries of one candidate block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedBlock {
    /// Opening line through closing line, end exclusive.
    range: LineRange,
}

impl LocatedBlock {
    fn new(opening: usize, closing: usize) -> Self {
        debug_assert!(opening + 1 < closing);
        Self {
            range: LineRange::spanning(opening, closing),
        }
    }

    pub fn range(&self) -> LineRange {
        self.range
    }

    pub fn opening(&self) -> usize {
        self.range.start()
    }

    /// The marker always sits directly after the opening delimiter.
    pub fn marker(&self) -> usize {
        self.range.start() + 1
    }

    pub fn closing(&self) -> usize {
        self.range.end() - 1
    }
}

/// What the locator found at a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    Located(LocatedBlock),
    /// Marker without an opening delimiter on the preceding line.
    Malformed { marker: usize },
    /// Marker with no closing delimiter anywhere after it.
    Unterminated { marker: usize },
}

impl ScanEvent {
    pub fn marker(&self) -> usize {
        match self {
            ScanEvent::Located(block) => block.marker(),
            ScanEvent::Malformed { marker } | ScanEvent::Unterminated { marker } => *marker,
        }
    }
}

/// Walks the log one line at a time and yields an event for every marker.
///
/// After a marker the cursor moves to the following line, not past the whole
/// block, so markers nested inside an open block are still considered.
pub struct BlockLocator<'a> {
    lines: &'a [String],
    cursor: usize,
    /// Last closing-delimiter search: where it started and what it found.
    last_close: Option<(usize, Option<usize>)>,
}

impl<'a> BlockLocator<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            cursor: 0,
            last_close: None,
        }
    }

    /// Index of the first closing delimiter at or after `from`.
    ///
    /// Queries only move forward, so a cached hit at `j` answers every query
    /// up to `j`, and a cached miss answers every later query.
    fn closing_from(&mut self, from: usize) -> Option<usize> {
        if let Some((searched_from, hit)) = self.last_close
            && from >= searched_from
        {
            match hit {
                None => return None,
                Some(j) if from <= j => return Some(j),
                Some(_) => {}
            }
        }

        let hit = self.lines[from..]
            .iter()
            .position(|line| line.contains(CLOSE))
            .map(|offset| from + offset);
        self.last_close = Some((from, hit));
        hit
    }
}

impl Iterator for BlockLocator<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        while self.cursor < self.lines.len() {
            let idx = self.cursor;
            self.cursor += 1;

            if !self.lines[idx].contains(MARKER) {
                continue;
            }

            let Some(opening) = idx
                .checked_sub(1)
                .filter(|&prev| self.lines[prev].contains(OPEN))
            else {
                return Some(ScanEvent::Malformed { marker: idx });
            };

            return Some(match self.closing_from(idx + 1) {
                Some(closing) => ScanEvent::Located(LocatedBlock::new(opening, closing)),
                None => ScanEvent::Unterminated { marker: idx },
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::lines;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn events(text: &str) -> Vec<ScanEvent> {
        let lines = lines(text);
        BlockLocator::new(&lines).collect()
    }

    fn located(opening: usize, closing: usize) -> ScanEvent {
        ScanEvent::Located(LocatedBlock::new(opening, closing))
    }

    #[test]
    fn finds_block_boundaries() {
        // Given a log with one generated suppression
        let text = "==1== noise\n{\n   <insert a suppression name here>\n   Memcheck:Leak\n   fun:malloc\n}\n==1== more\n";

        // When scanning
        let found = events(text);

        // Then the range runs from the opening line through the closing line
        assert_eq!(found, vec![located(1, 5)]);
        let ScanEvent::Located(block) = found[0] else {
            unreachable!()
        };
        assert_eq!(block.range(), LineRange::new(1, 6).unwrap());
        assert_eq!(block.marker(), 2);
        assert_eq!(block.closing(), 5);
    }

    #[rstest]
    #[case::marker_on_first_line("<insert a suppression name here>\n}\n", 0)]
    #[case::no_opening_delimiter("text\n<insert a suppression name here>\n}\n", 1)]
    #[case::opening_two_lines_up("{\n\n<insert a suppression name here>\n}\n", 2)]
    fn marker_without_opening_is_malformed(#[case] text: &str, #[case] marker: usize) {
        assert_eq!(events(text), vec![ScanEvent::Malformed { marker }]);
    }

    #[rstest]
    #[case::at_end_of_log("{\n<insert a suppression name here>", 1)]
    #[case::body_without_close("a\n{\n<insert a suppression name here>\n   fun:f\n", 2)]
    fn marker_without_closing_is_unterminated(#[case] text: &str, #[case] marker: usize) {
        assert_eq!(events(text), vec![ScanEvent::Unterminated { marker }]);
    }

    #[test]
    fn empty_log_yields_nothing() {
        assert!(events("").is_empty());
    }

    #[test]
    fn log_without_markers_yields_nothing() {
        assert!(events("{\n  fun:main\n}\n").is_empty());
    }

    #[test]
    fn substring_match_tolerates_prefixes() {
        let text = "==42== {\n==42==    <insert a suppression name here>\n==42==    fun:f\n==42== }\n";
        assert_eq!(events(text), vec![located(0, 3)]);
    }

    #[test]
    fn adjacent_blocks_are_found_independently() {
        let text = "{\n<insert a suppression name here>\nA\n}\n{\n<insert a suppression name here>\nB\n}\n";
        assert_eq!(events(text), vec![located(0, 3), located(4, 7)]);
    }

    #[test]
    fn nested_marker_is_considered_from_its_own_position() {
        // Given a second block opening before the first one closes
        let text = "{\n<insert a suppression name here>\n{\n<insert a suppression name here>\nX\n}\n";

        // Then both markers resolve to the same closing line
        assert_eq!(events(text), vec![located(0, 5), located(2, 5)]);
    }

    #[test]
    fn unterminated_markers_after_last_close() {
        let text = "{\n<insert a suppression name here>\n}\n{\n<insert a suppression name here>\n{\n<insert a suppression name here>\n";
        assert_eq!(
            events(text),
            vec![
                located(0, 2),
                ScanEvent::Unterminated { marker: 4 },
                ScanEvent::Unterminated { marker: 6 },
            ]
        );
    }

    #[test]
    fn cached_closing_search_matches_fresh_scan() {
        let text = "{\n<insert a suppression name here>\nx\n<insert a suppression name here>\n}\nno marker\n{\n<insert a suppression name here>\n}\n<insert a suppression name here>\n";
        let lines = lines(text);

        let cached: Vec<_> = BlockLocator::new(&lines).collect();
        let fresh: Vec<_> = BlockLocator::new(&lines)
            .map(|event| {
                // Re-run each query against a locator with an empty cache
                let mut fresh_locator = BlockLocator::new(&lines);
                match event {
                    ScanEvent::Located(block) => {
                        assert_eq!(fresh_locator.closing_from(block.marker() + 1), Some(block.closing()));
                        event
                    }
                    other => other,
                }
            })
            .collect();

        assert_eq!(cached, fresh);
        assert_eq!(
            cached,
            vec![
                located(0, 4),
                ScanEvent::Malformed { marker: 3 },
                located(6, 8),
                ScanEvent::Malformed { marker: 9 },
            ]
        );
    }
}
