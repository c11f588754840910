//! Console writer
//!
//! Prints payloads as JSON to stdout or an injected sink.

use crate::core::traits::{Component, Writer};
use crate::types::options::get_bool;
use crate::types::{Options, PipelineError, ResultPayload};
use std::fmt;
use std::io::{self, Write};

/// Prints each payload as JSON (`console`)
///
/// Output goes to stdout unless constructed with [`ConsoleWriter::with_output`].
/// Option `pretty` (default true) selects indented output.
pub struct ConsoleWriter {
    output: Box<dyn Write>,
    pretty: bool,
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        ConsoleWriter::with_output(Box::new(io::stdout()))
    }
}

impl fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleWriter")
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}

impl ConsoleWriter {
    pub fn with_output(output: Box<dyn Write>) -> Self {
        ConsoleWriter {
            output,
            pretty: true,
        }
    }
}

impl Component for ConsoleWriter {
    fn init(&mut self, options: &Options) -> Result<(), PipelineError> {
        if let Some(pretty) = get_bool(options, "pretty")? {
            self.pretty = pretty;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ConsoleWriter"
    }
}

impl Writer for ConsoleWriter {
    fn write(&mut self, payload: &ResultPayload) -> Result<(), PipelineError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.output, payload)?;
        } else {
            serde_json::to_writer(&mut self.output, payload)?;
        }
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(())
    }
}
