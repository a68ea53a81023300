//! Helper functions shared by the templates and the CLI

mod date;
mod url;

pub use date::*;
pub use url::*;
