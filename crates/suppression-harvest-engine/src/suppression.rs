use std::fmt;
use std::io::{self, Write};

/// Prefix of generated labels unless configured otherwise.
pub const DEFAULT_LABEL_PREFIX: &str = "new";

/// A generated sequential label such as `new7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    prefix: String,
    number: u64,
}

impl Label {
    pub fn new(prefix: impl Into<String>, number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            number,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The line inserted after the opening delimiter: two spaces, the label, a newline.
    pub fn to_line(&self) -> String {
        format!("  {self}\n")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}

/// The name slot of an accepted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Name {
    /// Assigned during this run.
    Generated(Label),
    /// Carried over verbatim from an existing suppression file.
    Existing(String),
}

impl Name {
    fn line(&self) -> String {
        match self {
            Name::Generated(label) => label.to_line(),
            Name::Existing(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Generated(label) => label.fmt(f),
            Name::Existing(raw) => f.write_str(raw.trim()),
        }
    }
}

/// An unlabeled block lifted out of the log.
///
/// `rule` holds the lines strictly between the marker line and the closing
/// delimiter; the marker line itself is never captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub opening: String,
    pub rule: Vec<String>,
    pub closing: String,
}

impl Candidate {
    /// Attaches a name, producing the block in its emitted shape.
    pub fn into_suppression(self, name: Name) -> Suppression {
        Suppression {
            opening: self.opening,
            name,
            rule: self.rule,
            closing: self.closing,
        }
    }
}

/// An accepted suppression block: opening, name, rule lines, closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suppression {
    opening: String,
    name: Name,
    rule: Vec<String>,
    closing: String,
}

impl Suppression {
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Label number when the name was generated by this tool.
    pub fn label_number(&self) -> Option<u64> {
        match &self.name {
            Name::Generated(label) => Some(label.number()),
            Name::Existing(_) => None,
        }
    }

    pub fn rule(&self) -> &[String] {
        &self.rule
    }

    /// Two blocks suppress the same thing when everything past the opening
    /// delimiter and name slot matches exactly, in order.
    pub fn same_rule(&self, rule: &[String]) -> bool {
        self.rule == rule
    }

    /// All lines in output order.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.rule.len() + 3);
        out.push(self.opening.clone());
        out.push(self.name.line());
        out.extend(self.rule.iter().cloned());
        out.push(self.closing.clone());
        out
    }

    /// Writes the whole block, terminating any line that lacks a newline.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for line in self.lines() {
            w.write_all(line.as_bytes())?;
            if !line.ends_with('\n') {
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
