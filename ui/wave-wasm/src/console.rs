//! Routes `tracing` output to the browser console.

use std::io;
use tracing_subscriber::fmt::MakeWriter;

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter)
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .try_init();
}

struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::default()
    }
}

/// One formatted event, flushed to `console.log` on drop.
#[derive(Default)]
struct ConsoleLine(Vec<u8>);

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.0);
        let line = line.trim_end();
        if !line.is_empty() {
            gloo_console::log!(line.to_owned());
        }
    }
}
