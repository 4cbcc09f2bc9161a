/// A half-open range of line indices `[start, end)` into the log.
///
/// Block boundaries are always carried as a `LineRange` so that the opening,
/// marker and closing positions come from named accessors rather than ad-hoc
/// index arithmetic at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Creates a range, returning `None` when `end < start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Range covering `first..=last`.
    pub(crate) fn spanning(first: usize, last: usize) -> Self {
        debug_assert!(first <= last);
        Self {
            start: first,
            end: last + 1,
        }
    }

    /// Inclusive first line index.
    #[must_use]
    pub fn start(self) -> usize {
        self.start
    }

    /// Exclusive end line index.
    #[must_use]
    pub fn end(self) -> usize {
        self.end
    }

    /// Index of the final line in the range, if any.
    #[must_use]
    pub fn last(self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(self, idx: usize) -> bool {
        (self.start..self.end).contains(&idx)
    }
}
