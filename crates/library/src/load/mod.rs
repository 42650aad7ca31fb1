//! Timeout-bounded chart loading.
//!
//! Parsing happens on a blocking thread that is raced against a fixed
//! timeout. A parse that loses the race is abandoned rather than cancelled:
//! the thread runs to completion in the background and its result, held only
//! by that task's own join handle, is dropped unread.

pub mod error;
mod loader;
mod record;

pub use self::loader::{DEFAULT_LOAD_TIMEOUT, Loader};
pub use self::record::{ChartRecord, LoadFailure, LoadStatus};
