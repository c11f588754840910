//! Result payload writers
//!
//! - `console` - pretty JSON on stdout
//! - `file` - one compact JSON line per payload (NDJSON)
//! - `api` - HTTP POST per payload

pub mod api;
pub mod console;
pub mod file;

pub use api::ApiWriter;
pub use console::ConsoleWriter;
pub use file::FileWriter;
