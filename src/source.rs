//! Line-oriented [`CommandSource`] implementation.
//!
//! Reads newline-delimited JSON [`Command`]s from any buffered reader:
//! standard input for the `panegrid` binary, an in-memory cursor in tests.
//!
//! # Wire format
//!
//! ```json
//! {"Add":{"panel":1,"params":{"row":0,"column":1}}}
//! {"FocusDirection":"left"}
//! {"SwitchLayout":{"Slots":"Coding"}}
//! "Clear"
//! ```
//!
//! Blank lines are skipped.  Malformed lines are logged and skipped unless
//! the source is [`strict`](StreamSource::strict).

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::BufRead;
use std::sync::mpsc;

/// A [`CommandSource`] over a buffered reader.
pub struct StreamSource<R> {
    reader: R,
    strict: bool,
}

/// Errors produced by a [`StreamSource`].
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl<R: BufRead + Send> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            strict: false,
        }
    }

    /// Stop at the first malformed line instead of skipping it.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl<R: BufRead + Send> CommandSource for StreamSource<R> {
    type Error = StreamError;

    /// Read until end of input.
    ///
    /// Returns early, without error, when the receiving end of `sink` is
    /// dropped.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        for (index, line) in (&mut self.reader).lines().enumerate() {
            let text = line?;
            if text.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Command>(&text) {
                Ok(cmd) => {
                    debug!("received {:?}", cmd);
                    if sink.send(cmd).is_err() {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Err(source) if self.strict => {
                    return Err(StreamError::Json {
                        line: index + 1,
                        source,
                    });
                }
                Err(e) => error!("bad command on line {}: {}: {}", index + 1, text, e),
            }
        }
        debug!("end of input");
        Ok(())
    }
}

//  Tests
