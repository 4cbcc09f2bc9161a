//! Locating suppression blocks in a raw log and lifting them out.
//!
//! Scanning happens in two phases, mirroring the shape of a block parser:
//! [`BlockLocator`] walks the lines and reports one [`ScanEvent`] per marker,
//! then [`extract`] copies the located lines into a [`Candidate`](crate::Candidate).

mod extract;
mod locator;
mod range;

pub use extract::extract;
pub use locator::{BlockLocator, CLOSE, LocatedBlock, MARKER, OPEN, ScanEvent};
pub use range::LineRange;
