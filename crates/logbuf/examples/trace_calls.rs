//! Streams a small request through a [`LoggedBuffer`] and prints its call
//! log, with every call also emitted as a `tracing` event.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=logbuf=trace cargo run -p logbuf --example trace_calls
//! ```

use std::{error::Error, io::Write as _};

use logbuf::LoggedBuffer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const REQUEST: &str = "GET /index.html HTTP/1.1\r\nHost: example.org\r\nAccept: */*\r\n\r\n";

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut buf = LoggedBuffer::empty();
    buf.read_from(&mut REQUEST.as_bytes())?;

    let request_line = buf.read_string(b'\n')?;
    println!("request line: {}", request_line.trim_end());

    loop {
        let header = buf.read_string(b'\n')?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        println!("header: {header}");
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\ncall log:")?;
    for line in buf.logs() {
        writeln!(stdout, "  {line}")?;
    }
    Ok(())
}
