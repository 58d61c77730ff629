//! `tracing-subscriber` adapter.

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;

use super::PrintBridge;

/// Buffers one formatted event and prints it through the bridge on drop.
#[derive(Debug)]
pub struct EventWriter {
    bridge: PrintBridge,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        self.bridge.print(text.trim_end_matches(['\r', '\n']));
    }
}

impl<'a> MakeWriter<'a> for PrintBridge {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            bridge: self.clone(),
            buf: Vec::with_capacity(128),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Sink;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_events_arrive_whole() {
        let bridge = PrintBridge::new();
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: Sink = Arc::new(move |text: &str| sink_seen.lock().unwrap().push(text.to_owned()));
        bridge.install(sink, false, 0);

        let subscriber = tracing_subscriber::fmt()
            .with_writer(bridge.clone())
            .without_time()
            .with_target(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("copied file");
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ends_with("copied file"), "{:?}", seen[0]);
        assert!(!seen[0].ends_with('\n'));
    }
}
