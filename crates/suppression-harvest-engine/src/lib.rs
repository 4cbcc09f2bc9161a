pub mod dedup;
pub mod harvest;
pub mod io;
pub mod scan;
pub mod suppression;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dedup::*;
pub use harvest::*;
pub use io::*;
pub use scan::{BlockLocator, LineRange, LocatedBlock, ScanEvent, extract};
pub use suppression::*;
