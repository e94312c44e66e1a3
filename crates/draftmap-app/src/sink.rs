//! Render sink that streams notifications as JSON lines.

use draftmap_core::{RenderPayload, RenderSink};
use serde::Serialize;
use std::io::{self, Write};

/// Borrowed form of `RenderEvent`, serialized with the same shape.
#[derive(Serialize)]
struct EventRecord<'a> {
    event: &'a str,
    payload: &'a RenderPayload,
}

/// Writes each notification as one JSON object per line.
///
/// `RenderSink::fire` cannot fail, so the first write error is kept and
/// reported by [`JsonLineSink::finish`]; later events are dropped.
pub struct JsonLineSink<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer, or the first error hit while writing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &str, payload: &RenderPayload) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &EventRecord { event, payload })?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> RenderSink for JsonLineSink<W> {
    fn fire(&mut self, event: &str, payload: &RenderPayload) {
        if self.error.is_some() {
            return;
        }
        match self.write_event(event, payload) {
            Ok(()) => self.written += 1,
            Err(e) => {
                log::error!("Failed to write {} event: {}", event, e);
                self.error = Some(e);
            }
        }
    }
}
