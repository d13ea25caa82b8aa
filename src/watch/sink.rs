// src/watch/sink.rs

//! Destinations for lines consumed by a scan.

use std::io::{self, Write};

use tracing::info;

/// Receives every line a scan consumes, before it is checked for a match.
pub trait LineSink {
    fn line(&mut self, line: &str) -> io::Result<()>;
}

/// Any `FnMut(&str)` closure can serve as a sink.
impl<F> LineSink for F
where
    F: FnMut(&str),
{
    fn line(&mut self, line: &str) -> io::Result<()> {
        self(line);
        Ok(())
    }
}

/// Drops every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LineSink for NullSink {
    fn line(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Logs each line at `info` tagged with the source it came from.
#[derive(Debug, Clone)]
pub struct TracingSink {
    source: String,
}

impl TracingSink {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl LineSink for TracingSink {
    fn line(&mut self, line: &str) -> io::Result<()> {
        info!(source = %self.source, "{}", line);
        Ok(())
    }
}

/// Writes each line, newline-terminated, to the wrapped writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}
