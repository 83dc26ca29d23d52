//! `tracing-subscriber` writer that delivers each formatted event as one
//! line to a sink. The browser build points the sink at `web_sys::console`.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
pub struct LineMakeWriter<F> {
    sink: F,
}

impl<F> LineMakeWriter<F>
where
    F: Fn(Level, &str) + Clone,
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

/// Buffers one event; the line is emitted when the writer is dropped.
pub struct LineWriter<F: Fn(Level, &str)> {
    level: Level,
    buf: Vec<u8>,
    sink: F,
}

impl<F: Fn(Level, &str)> io::Write for LineWriter<F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<F: Fn(Level, &str)> Drop for LineWriter<F> {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            (self.sink)(self.level, line);
        }
    }
}

impl<'a, F> MakeWriter<'a> for LineMakeWriter<F>
where
    F: Fn(Level, &str) + Clone + 'a,
{
    type Writer = LineWriter<F>;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(*meta.level())
    }
}

impl<F: Fn(Level, &str) + Clone> LineMakeWriter<F> {
    fn writer(&self, level: Level) -> LineWriter<F> {
        LineWriter {
            level,
            buf: Vec::new(),
            sink: self.sink.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{error, info, warn};

    use super::*;

    fn capture(f: impl FnOnce()) -> Vec<(Level, String)> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let lines = lines.clone();
            move |level: Level, line: &str| lines.lock().unwrap().push((level, line.to_string()))
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(LineMakeWriter::new(sink))
            .with_ansi(false)
            .without_time()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let lines = lines.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_each_event_becomes_one_line_at_its_level() {
        let lines = capture(|| {
            error!("Unexpected error during generate: boom");
            warn!("Job service returned 500");
            info!("Submitting job");
        });

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].0, Level::ERROR);
        assert!(lines[0].1.contains("Unexpected error during generate: boom"));
        assert!(!lines[0].1.ends_with('\n'));
        assert_eq!(lines[1].0, Level::WARN);
        assert_eq!(lines[2].0, Level::INFO);
    }

    #[test]
    fn test_filtered_events_are_not_delivered() {
        let lines = capture(|| tracing::trace!("too chatty"));
        assert!(lines.is_empty());
    }
}
