use std::fmt;
use std::io::Write;

use crate::dedup::{Deduplicator, Outcome};
use crate::scan::{BlockLocator, ScanEvent, extract};

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("Failed to write suppression {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },
}

/// Tally of one pass over a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub markers: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub malformed: usize,
    pub unterminated: usize,
    pub first_label: Option<u64>,
    pub last_label: Option<u64>,
}

impl fmt::Display for HarvestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} markers: {} accepted, {} duplicate, {} malformed, {} unterminated",
            self.markers, self.accepted, self.duplicates, self.malformed, self.unterminated
        )?;
        if let (Some(first), Some(last)) = (self.first_label, self.last_label) {
            write!(f, " (labels {first}..={last})")?;
        }
        Ok(())
    }
}

/// Runs locate, extract and deduplicate over `lines`, writing every newly
/// accepted block to `out` as soon as it is labeled.
///
/// Each block is flushed before the next marker is looked at, so an
/// interrupted run leaves a file holding only whole blocks. Malformed and
/// unterminated markers are counted and skipped; only write failures abort.
/// The label counter is logged under the `progress` target after every marker.
pub fn harvest<W: Write>(
    lines: &[String],
    dedup: &mut Deduplicator,
    out: &mut W,
) -> Result<HarvestReport, HarvestError> {
    harvest_with_progress(lines, dedup, out, |_, counter| {
        log::info!(target: "progress", "{counter}");
    })
}

/// [`harvest`] with a caller-supplied progress callback, invoked once per
/// marker with the event and the label counter after it was processed.
pub fn harvest_with_progress<W, F>(
    lines: &[String],
    dedup: &mut Deduplicator,
    out: &mut W,
    mut on_marker: F,
) -> Result<HarvestReport, HarvestError>
where
    W: Write,
    F: FnMut(&ScanEvent, u64),
{
    let mut report = HarvestReport::default();

    for event in BlockLocator::new(lines) {
        report.markers += 1;

        match event {
            ScanEvent::Located(block) => match dedup.offer(extract(lines, &block)) {
                Outcome::Accepted(suppression) => {
                    suppression
                        .write_to(out)
                        .and_then(|()| out.flush())
                        .map_err(|source| HarvestError::Write {
                            name: suppression.name().to_string(),
                            source,
                        })?;
                    log::info!(
                        "Accepted {} from line {}",
                        suppression.name(),
                        block.opening() + 1
                    );
                    report.accepted += 1;
                    if let Some(number) = suppression.label_number() {
                        report.first_label.get_or_insert(number);
                        report.last_label = Some(number);
                    }
                }
                Outcome::Duplicate { of } => {
                    log::debug!("Block at line {} duplicates {of}", block.opening() + 1);
                    report.duplicates += 1;
                }
            },
            ScanEvent::Malformed { marker } => {
                log::debug!("Skipping marker at line {}: no opening delimiter", marker + 1);
                report.malformed += 1;
            }
            ScanEvent::Unterminated { marker } => {
                log::warn!("Skipping marker at line {}: no closing delimiter", marker + 1);
                report.unterminated += 1;
            }
        }

        on_marker(&event, dedup.counter());
    }

    Ok(report)
}
