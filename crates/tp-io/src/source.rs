//! JSON-lines event source: one event object per line, files chained in order.
//!
//! Opening a source only records where each event line starts. Lines are
//! read and parsed one at a time on [`EventSource::seek`], so memory does not
//! grow with the input and nothing past the event limit is ever decoded.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use tp_core::{Error, EventBuffer, EventSource, Result};

/// One chained input.
#[derive(Debug, Clone)]
enum Input {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl Input {
    fn reader(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Input::File(path) => {
                let file = File::open(path)?;
                if path.extension().is_some_and(|ext| ext == "gz") {
                    Ok(Box::new(BufReader::new(GzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
            Input::Memory(bytes) => Ok(Box::new(io::Cursor::new(Arc::clone(bytes)))),
        }
    }

    fn describe(&self) -> String {
        match self {
            Input::File(path) => path.display().to_string(),
            Input::Memory(_) => "<memory>".to_string(),
        }
    }
}

/// Start of one event line: input index and offset in the decoded stream.
#[derive(Debug, Clone, Copy)]
struct LineStart {
    input: usize,
    offset: u64,
}

/// Open reader positioned somewhere in one input.
struct LineCursor {
    input: usize,
    pos: u64,
    reader: Box<dyn BufRead>,
}

impl LineCursor {
    /// Read the line starting at `offset` into `line`.
    fn read_line_at(&mut self, offset: u64, line: &mut Vec<u8>) -> Result<()> {
        if self.pos < offset {
            let mut gap = (&mut self.reader).take(offset - self.pos);
            let skipped = io::copy(&mut gap, &mut io::sink())?;
            self.pos += skipped;
            if self.pos < offset {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input shrank after it was indexed",
                )));
            }
        }
        line.clear();
        let n = self.reader.read_until(b'\n', line)?;
        self.pos += n as u64;
        Ok(())
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Event source over newline-delimited JSON files (optionally gzipped).
pub struct JsonLinesSource<B> {
    inputs: Vec<Input>,
    index: Vec<LineStart>,
    cursor: Option<LineCursor>,
    line: Vec<u8>,
    buffer: B,
}

impl<B: EventBuffer + DeserializeOwned> JsonLinesSource<B> {
    /// Chain `files` in order. Files ending in `.gz` are decompressed.
    pub fn open<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        Self::open_limited(files, None)
    }

    /// Chain `files` in order, indexing at most `max_events` events.
    ///
    /// Input past the last indexed event is never read.
    pub fn open_limited<P: AsRef<Path>>(files: &[P], max_events: Option<usize>) -> Result<Self> {
        let inputs = files.iter().map(|p| Input::File(p.as_ref().to_path_buf())).collect();
        Self::from_inputs(inputs, max_events)
    }

    /// Source over in-memory lines.
    pub fn from_lines(lines: Vec<String>) -> Result<Self> {
        let bytes: Vec<u8> = lines.join("\n").into_bytes();
        Self::from_inputs(vec![Input::Memory(bytes.into())], None)
    }

    fn from_inputs(inputs: Vec<Input>, max_events: Option<usize>) -> Result<Self> {
        let limit = max_events.unwrap_or(usize::MAX);
        let mut index = Vec::new();
        let mut line = Vec::new();
        'inputs: for (i, input) in inputs.iter().enumerate() {
            if index.len() >= limit {
                break;
            }
            let mut reader = input.reader()?;
            let before = index.len();
            let mut pos = 0u64;
            loop {
                line.clear();
                let n = reader.read_until(b'\n', &mut line)?;
                if n == 0 {
                    break;
                }
                if !is_blank(&line) {
                    index.push(LineStart { input: i, offset: pos });
                    if index.len() >= limit {
                        log::debug!("{}: event limit {limit} reached", input.describe());
                        break 'inputs;
                    }
                }
                pos += n as u64;
            }
            log::debug!("{}: {} events", input.describe(), index.len() - before);
        }
        Ok(Self { inputs, index, cursor: None, line, buffer: B::default() })
    }
}

impl<B: EventBuffer + DeserializeOwned> EventSource for JsonLinesSource<B> {
    type Buffer = B;

    fn size(&self) -> usize {
        self.index.len()
    }

    fn seek(&mut self, event: usize) -> Result<()> {
        let start = *self.index.get(event).ok_or_else(|| {
            Error::Validation(format!("event {event} out of range ({} events)", self.index.len()))
        })?;
        // sequential seeks reuse the open reader; anything else reopens the input
        let mut cursor = match self.cursor.take() {
            Some(c) if c.input == start.input && c.pos <= start.offset => c,
            _ => LineCursor {
                input: start.input,
                pos: 0,
                reader: self.inputs[start.input].reader()?,
            },
        };
        cursor.read_line_at(start.offset, &mut self.line)?;
        let mut buffer: B = serde_json::from_slice(&self.line)?;
        self.cursor = Some(cursor);
        buffer.set_entry(event);
        self.buffer = buffer;
        Ok(())
    }

    fn buffer(&self) -> &B {
        &self.buffer
    }
}
