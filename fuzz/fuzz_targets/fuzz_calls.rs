#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use logbuf::{BufferError, LogOptions, LoggedBuffer};

#[derive(Arbitrary, Debug)]
enum Call {
    Bytes,
    Grow(u16),
    Len,
    Peek(u8),
    Next(u8),
    Read(u8),
    ReadByte,
    ReadUntil(u8),
    ReadFrom(Vec<u8>),
    ReadRune,
    Reset,
    Text,
    Truncate(u8),
    UnreadByte,
    UnreadRune,
    Write(Vec<u8>),
    WriteRune(char),
    WriteTo,
}

#[derive(Arbitrary, Debug)]
struct Input {
    initial: Vec<u8>,
    calls: Vec<Call>,
}

/// Drives the decorator and checks its unread content against a plain
/// `VecDeque` model after every call.
fn calls(input: Input) {
    let mut model: VecDeque<u8> = input.initial.iter().copied().collect();
    let mut buf = LoggedBuffer::with_options(
        input.initial,
        LogOptions {
            emit_events: false,
            ..Default::default()
        },
    );

    let mut expected_calls = 1;
    for call in &input.calls {
        expected_calls += 1;
        match call {
            Call::Bytes => {
                assert!(buf.unread_bytes().iter().eq(model.iter()));
            }
            Call::Grow(n) => {
                buf.grow(usize::from(*n)).unwrap();
            }
            Call::Len => assert_eq!(buf.len(), model.len()),
            Call::Peek(n) => {
                let n = usize::from(*n);
                match buf.peek(n) {
                    Ok(bytes) => assert!(bytes.iter().eq(model.iter().take(n))),
                    Err(BufferError::ShortBuffer { .. }) => assert!(n > model.len()),
                    Err(e) => panic!("unexpected peek error: {e}"),
                }
            }
            Call::Next(n) => {
                let taken = buf.next_bytes(usize::from(*n)).to_vec();
                let expected: Vec<u8> = model.drain(..taken.len()).collect();
                assert_eq!(taken, expected);
            }
            Call::Read(n) => {
                let mut dest = vec![0; usize::from(*n)];
                match buf.read(&mut dest) {
                    Ok(read) => {
                        let expected: Vec<u8> = model.drain(..read).collect();
                        assert_eq!(&dest[..read], &expected[..]);
                    }
                    Err(BufferError::EndOfData) => assert!(model.is_empty()),
                    Err(e) => panic!("unexpected read error: {e}"),
                }
            }
            Call::ReadByte => match buf.read_byte() {
                Ok(b) => assert_eq!(Some(b), model.pop_front()),
                Err(_) => assert!(model.is_empty()),
            },
            Call::ReadUntil(d) => {
                let line = match buf.read_until(*d) {
                    Ok(line) => line,
                    Err(BufferError::DelimiterNotFound { partial, .. }) => partial.into(),
                    Err(e) => panic!("unexpected read_until error: {e}"),
                };
                let expected: Vec<u8> = model.drain(..line.len()).collect();
                assert_eq!(line, expected);
            }
            Call::ReadFrom(data) => {
                let n = buf.read_from(&mut data.as_slice()).unwrap();
                assert_eq!(n as usize, data.len());
                model.extend(data);
            }
            Call::ReadRune => {
                if let Ok((_, width)) = buf.read_rune() {
                    model.drain(..width);
                }
            }
            Call::Reset => {
                buf.reset();
                model.clear();
            }
            Call::Text => {
                let contiguous: Vec<u8> = model.iter().copied().collect();
                assert_eq!(buf.text(), String::from_utf8_lossy(&contiguous));
            }
            Call::Truncate(n) => {
                let n = usize::from(*n);
                if buf.truncate(n).is_ok() {
                    model.truncate(n);
                } else {
                    assert!(n > model.len());
                }
            }
            // Unread steps back into bytes the model has already dropped, so
            // resynchronise from the buffer itself.
            Call::UnreadByte => {
                if buf.unread_byte().is_ok() {
                    model = buf.unread_bytes().iter().copied().collect();
                    expected_calls += 1;
                }
            }
            Call::UnreadRune => {
                if buf.unread_rune().is_ok() {
                    model = buf.unread_bytes().iter().copied().collect();
                    expected_calls += 1;
                }
            }
            Call::Write(bytes) => {
                assert_eq!(buf.write(bytes), Ok(bytes.len()));
                model.extend(bytes);
            }
            Call::WriteRune(c) => {
                let mut utf8 = [0; 4];
                let encoded = c.encode_utf8(&mut utf8).as_bytes();
                assert_eq!(buf.write_rune(*c), Ok(encoded.len()));
                model.extend(encoded);
            }
            Call::WriteTo => {
                let mut out = Vec::new();
                buf.write_to(&mut out).unwrap();
                assert!(out.iter().eq(model.iter()));
                model.clear();
            }
        }
    }

    assert_eq!(buf.call_count(), expected_calls);
    assert_eq!(buf.logs().len(), expected_calls);
}

fuzz_target!(|input: Input| calls(input));
