#![no_main]

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use abp_reader::{ByteSource, ReadError, ReadOptions, read_exact};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

// Fuzz target: read_exact over an arbitrary delivery schedule.
//
// Input: a request size and a list of chunks. Each chunk is handed out
// across as many reads as the accumulator's window requires; an empty
// chunk is a transient zero-byte read. After the last chunk the source
// reports end of data.
//
// The result must be the first `count` bytes of the concatenation, or
// EndOfStream carrying exactly how many bytes were available.
#[derive(Debug, Arbitrary)]
struct Input {
    count: u16,
    chunks: Vec<Vec<u8>>,
}

struct Scripted {
    chunks: Vec<Vec<u8>>,
    chunk: usize,
    pos: usize,
}

impl ByteSource for Scripted {
    fn is_at_end(&self) -> bool {
        self.chunk >= self.chunks.len()
    }

    fn poll_read_some(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let Some(current) = self.chunks.get(self.chunk) else {
            return Poll::Ready(Ok(0));
        };
        let rest = &current[self.pos..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);

        let finished = self.pos + n == current.len();
        if finished {
            self.chunk += 1;
            self.pos = 0;
        } else {
            self.pos += n;
        }
        Poll::Ready(Ok(n))
    }
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.count);
    let all: Vec<u8> = input.chunks.concat();
    let mut source = Scripted {
        chunks: input.chunks,
        chunk: 0,
        pos: 0,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let opts = ReadOptions::default().with_backoff(Duration::ZERO);
    let result = rt.block_on(read_exact(&mut source, count, &opts));

    match result {
        Ok(bytes) => {
            assert_eq!(bytes.len(), count);
            assert_eq!(bytes[..], all[..count]);
        }
        Err(ReadError::EndOfStream { requested, received }) => {
            assert_eq!(requested, count);
            assert_eq!(received, all.len());
            assert!(received < count);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
