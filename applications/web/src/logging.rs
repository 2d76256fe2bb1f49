//! Tracing subscriber writing to the browser console
//!
//! Events are formatted by the `fmt` layer and handed to the console method
//! matching their level. No timestamps: the console adds its own.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Produces one buffered writer per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

/// Buffers one formatted event and emits it when dropped
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// Formatted event text without the trailing newline
    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let message = self.message();
        if !message.is_empty() {
            emit(self.level, &message);
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

#[cfg(feature = "wasm")]
fn emit(level: Level, message: &str) {
    use web_sys::console;

    let value = wasm_bindgen::JsValue::from_str(message);
    if level == Level::ERROR {
        console::error_1(&value);
    } else if level == Level::WARN {
        console::warn_1(&value);
    } else if level == Level::INFO {
        console::info_1(&value);
    } else {
        console::debug_1(&value);
    }
}

#[cfg(not(feature = "wasm"))]
fn emit(level: Level, message: &str) {
    eprintln!("{level} {message}");
}

/// Install the console subscriber
///
/// A second call keeps the first subscriber.
pub fn init(level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_max_level(level)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
