use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;

use crate::{ByteBuffer, GrowableBuffer, LogOptions, LoggedBuffer};

#[derive(Debug, Clone)]
enum Op {
    UnreadBytes,
    Capacity,
    Grow(u8),
    Len,
    Peek(u8),
    NextBytes(u8),
    Read(u8),
    ReadByte,
    ReadUntil(u8),
    ReadFrom(Vec<u8>),
    ReadRune,
    ReadString(u8),
    Reset,
    Text,
    Truncate(u8),
    UnreadByte,
    UnreadRune,
    Write(Vec<u8>),
    WriteByte(u8),
    WriteRune(char),
    WriteString(String),
    WriteTo,
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::UnreadBytes => "unread_bytes",
            Op::Capacity => "capacity",
            Op::Grow(_) => "grow",
            Op::Len => "len",
            Op::Peek(_) => "peek",
            Op::NextBytes(_) => "next_bytes",
            Op::Read(_) => "read",
            Op::ReadByte => "read_byte",
            Op::ReadUntil(_) => "read_until",
            Op::ReadFrom(_) => "read_from",
            Op::ReadRune => "read_rune",
            Op::ReadString(_) => "read_string",
            Op::Reset => "reset",
            Op::Text => "text",
            Op::Truncate(_) => "truncate",
            Op::UnreadByte => "unread_byte",
            Op::UnreadRune => "unread_rune",
            Op::Write(_) => "write",
            Op::WriteByte(_) => "write_byte",
            Op::WriteRune(_) => "write_rune",
            Op::WriteString(_) => "write_string",
            Op::WriteTo => "write_to",
        }
    }
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        // Small delimiters and counts so that they actually hit content.
        let small = |g: &mut Gen| u8::arbitrary(g) % 16;
        match u8::arbitrary(g) % 22 {
            0 => Op::UnreadBytes,
            1 => Op::Capacity,
            2 => Op::Grow(u8::arbitrary(g)),
            3 => Op::Len,
            4 => Op::Peek(small(g)),
            5 => Op::NextBytes(small(g)),
            6 => Op::Read(small(g)),
            7 => Op::ReadByte,
            8 => Op::ReadUntil(b'a' + small(g)),
            9 => Op::ReadFrom(Vec::arbitrary(g)),
            10 => Op::ReadRune,
            11 => Op::ReadString(b'a' + small(g)),
            12 => Op::Reset,
            13 => Op::Text,
            14 => Op::Truncate(small(g)),
            15 => Op::UnreadByte,
            16 => Op::UnreadRune,
            17 => Op::Write(Vec::arbitrary(g)),
            18 => Op::WriteByte(u8::arbitrary(g)),
            19 => Op::WriteRune(char::arbitrary(g)),
            20 => Op::WriteString(String::arbitrary(g)),
            _ => Op::WriteTo,
        }
    }
}

/// Runs `op` against anything exposing the buffer method names and renders
/// the full result, including bytes copied out.
macro_rules! apply {
    ($buf:expr, $op:expr) => {{
        let buf = $buf;
        match $op {
            Op::UnreadBytes => format!("{:?}", buf.unread_bytes()),
            Op::Capacity => format!("{:?}", buf.capacity()),
            Op::Grow(n) => format!("{:?}", buf.grow(usize::from(*n))),
            Op::Len => format!("{:?}", buf.len()),
            Op::Peek(n) => format!("{:?}", buf.peek(usize::from(*n))),
            Op::NextBytes(n) => format!("{:?}", buf.next_bytes(usize::from(*n))),
            Op::Read(n) => {
                let mut dest = vec![0; usize::from(*n)];
                let result = buf.read(&mut dest);
                format!("{result:?} {dest:?}")
            }
            Op::ReadByte => format!("{:?}", buf.read_byte()),
            Op::ReadUntil(d) => format!("{:?}", buf.read_until(*d)),
            Op::ReadFrom(data) => format!("{:?}", buf.read_from(&mut data.as_slice()).ok()),
            Op::ReadRune => format!("{:?}", buf.read_rune()),
            Op::ReadString(d) => format!("{:?}", buf.read_string(*d)),
            Op::Reset => {
                buf.reset();
                String::new()
            }
            Op::Text => format!("{:?}", buf.text()),
            Op::Truncate(n) => format!("{:?}", buf.truncate(usize::from(*n))),
            Op::UnreadByte => format!("{:?}", buf.unread_byte()),
            Op::UnreadRune => format!("{:?}", buf.unread_rune()),
            Op::Write(bytes) => format!("{:?}", buf.write(bytes)),
            Op::WriteByte(b) => format!("{:?}", buf.write_byte(*b)),
            Op::WriteRune(c) => format!("{:?}", buf.write_rune(*c)),
            Op::WriteString(s) => format!("{:?}", buf.write_string(s)),
            Op::WriteTo => {
                let mut out = Vec::new();
                let result = buf.write_to(&mut out).ok();
                format!("{result:?} {out:?}")
            }
        }
    }};
}

/// Property: the decorator returns exactly what the bare buffer returns, and
/// logs one record per call in call order.
#[test]
fn decorator_matches_bare_buffer_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(initial: Vec<u8>, ops: Vec<Op>) -> bool {
        // Both sides start from a fresh copy so their capacities agree.
        let mut bare = ByteBuffer::from(initial.clone());
        let mut logged = LoggedBuffer::with_options(
            initial.clone(),
            LogOptions {
                emit_events: false,
                ..Default::default()
            },
        );

        for op in &ops {
            let expected = apply!(&mut bare, op);
            let actual = apply!(&mut logged, op);
            if expected != actual {
                return false;
            }
        }

        let recorded: Vec<_> = logged.records().iter().map(|r| r.operation).collect();
        let expected: Vec<_> = core::iter::once("new")
            .chain(ops.iter().map(Op::name))
            .collect();
        recorded == expected && logged.call_count() == ops.len() + 1
    }

    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<u8>, Vec<Op>) -> bool);
}

#[quickcheck]
fn write_then_read_returns_input(initial: Vec<u8>, payload: Vec<u8>) -> bool {
    let mut buf = LoggedBuffer::new(initial.clone());
    buf.next_bytes(initial.len());
    let before = buf.call_count();

    let written = buf.write(&payload);
    let mut dest = vec![0; payload.len()];
    let read = buf.read(&mut dest);

    written == Ok(payload.len())
        && read == Ok(payload.len())
        && dest == payload
        && buf.call_count() == before + 2
}

#[quickcheck]
fn reset_then_len_is_zero(initial: Vec<u8>, extra: String) -> bool {
    let mut buf = LoggedBuffer::new(initial);
    buf.write_string(&extra).unwrap();
    buf.reset();
    buf.len() == 0 && buf.call_count() == 4
}
