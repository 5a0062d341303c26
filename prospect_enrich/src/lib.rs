#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod driver;
pub mod progress;
pub mod roster;

pub use driver::EnrichmentDriver;
pub use progress::{ProgressEvent, ProgressSink};
pub use roster::{EnrichError, read_roster};
