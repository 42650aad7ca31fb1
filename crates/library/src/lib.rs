//! Files loose difference charts ("sabun") into an organized song library.
//!
//! The pipeline has four stages, each in its own module:
//!
//! 1. [`scan`] walks a directory tree, pairs every chart with the sibling
//!    sound files it references, and loads the charts concurrently.
//! 2. [`load`] parses a single chart under a hard timeout so that one
//!    pathological file can't stall a batch.
//! 3. [`matching`] classifies each chart against a [`Catalog`] of already
//!    organized charts.
//! 4. [`relocate`] moves confirmed matches into the catalog's directories.
//!
//! [`batch`] drives stages 3 and 4 over a whole scan as event streams.
//!
//! [`Catalog`]: sabun_catalog::Catalog

pub mod batch;
pub mod error;
pub mod load;
pub mod matching;
pub mod relocate;
pub mod scan;

pub use crate::batch::{MatchEvent, RelocateEvent, Tally, classify_all, relocate_all};
pub use crate::load::{ChartRecord, LoadFailure, LoadStatus, Loader};
pub use crate::matching::{MatchLevel, MatchOutcome, Overlap, Sign, classify, classify_unit};
pub use crate::relocate::{Action, relocate, relocate_unit};
pub use crate::scan::{SabunUnit, scan};

/// Chart loads kept in flight at once unless configured otherwise.
pub const MAX_PROCESS_CONCURRENCY: usize = 100;

/// Settings shared by every stage of a run.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub loader: Loader,
    /// Upper bound on concurrent chart loads and classifications.
    pub max_concurrency: usize,
}
impl Default for Context {
    fn default() -> Self {
        Self { loader: Loader::default(), max_concurrency: MAX_PROCESS_CONCURRENCY }
    }
}
