//! JSON output of report payloads

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::cli::OutputFormat;
use crate::error::Result;

/// Indentation used for pretty output
const INDENT: &[u8] = b"    ";

/// Writes each payload to the output stream as soon as it is produced.
///
/// Payloads are written in call order, one per `emit`, without buffering
/// across calls.
pub struct ReportEmitter<W: Write> {
    out: W,
    format: OutputFormat,
    emitted: usize,
}

impl<W: Write> ReportEmitter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            emitted: 0,
        }
    }

    /// Write one payload followed by a newline.
    pub fn emit<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<()> {
        let rendered = format_payload(payload, self.format)?;
        self.out.write_all(rendered.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.emitted += 1;
        Ok(())
    }

    /// Number of payloads written so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Consume the emitter and return the underlying writer
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a payload in the requested format.
pub fn format_payload<T: Serialize + ?Sized>(payload: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut buf = Vec::new();
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
            payload.serialize(&mut ser)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        OutputFormat::Json => Ok(serde_json::to_string(payload)?),
    }
}
