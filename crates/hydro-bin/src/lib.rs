//! Library surface behind the `hydro` binary, split out so integration tests
//! can exercise the CLI parsing and report formatting directly.

pub mod cli;
pub mod report;
