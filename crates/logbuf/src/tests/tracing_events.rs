use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;

use crate::{LogOptions, LoggedBuffer};

/// Writer that appends everything into a shared vector.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured<F: FnOnce()>(f: F) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

#[test]
fn records_are_mirrored_as_events() {
    let output = captured(|| {
        let mut buf = LoggedBuffer::from_text("abc");
        buf.read_byte().unwrap();
    });
    assert!(output.contains("buffer call"), "{output}");
    assert!(output.contains("read_byte"), "{output}");
    assert!(output.contains("TRACE"), "{output}");
    assert_eq!(output.lines().count(), 2, "{output}");
}

#[test]
fn events_can_be_disabled() {
    let output = captured(|| {
        let mut buf = LoggedBuffer::with_options(
            b"abc".to_vec(),
            LogOptions {
                emit_events: false,
                ..Default::default()
            },
        );
        buf.read_byte().unwrap();
        assert_eq!(buf.call_count(), 2);
    });
    assert_eq!(output, "");
}
