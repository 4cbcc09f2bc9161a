use crate::suppression::{Candidate, DEFAULT_LABEL_PREFIX, Label, Name, Suppression};

/// Result of offering a candidate to the [`Deduplicator`].
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// New rule; labeled and recorded.
    Accepted(&'a Suppression),
    /// Rule already recorded under `of`; nothing changed.
    Duplicate { of: &'a Name },
}

/// Owns the label counter and the set of accepted blocks for one run.
///
/// Lookup is a linear scan in insertion order. Every accepted block has a
/// distinct rule, and generated labels run `start_offset + 1`, `+ 2`, ... with
/// no gaps.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    counter: u64,
    prefix: String,
    accepted: Vec<Suppression>,
}

impl Deduplicator {
    /// `start_offset` is the number of suppressions committed in earlier runs.
    pub fn new(start_offset: u64) -> Self {
        Self::with_prefix(start_offset, DEFAULT_LABEL_PREFIX)
    }

    pub fn with_prefix(start_offset: u64, prefix: impl Into<String>) -> Self {
        Self {
            counter: start_offset,
            prefix: prefix.into(),
            accepted: Vec::new(),
        }
    }

    /// Records a block committed in an earlier run so that the same rule is
    /// not emitted again. Leaves the counter alone. Returns `false` if the
    /// rule was already known.
    pub fn seed(&mut self, suppression: Suppression) -> bool {
        if self.position(suppression.rule()).is_some() {
            return false;
        }
        self.accepted.push(suppression);
        true
    }

    /// Labels and records `candidate` unless its rule is already present.
    pub fn offer(&mut self, candidate: Candidate) -> Outcome<'_> {
        if let Some(idx) = self.position(&candidate.rule) {
            return Outcome::Duplicate {
                of: self.accepted[idx].name(),
            };
        }

        self.counter += 1;
        let label = Label::new(self.prefix.clone(), self.counter);
        let idx = self.accepted.len();
        self.accepted
            .push(candidate.into_suppression(Name::Generated(label)));
        Outcome::Accepted(&self.accepted[idx])
    }

    /// Label number of the most recently generated block, or the start offset.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn accepted(&self) -> &[Suppression] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    fn position(&self, rule: &[String]) -> Option<usize> {
        self.accepted.iter().position(|s| s.same_rule(rule))
    }
}
