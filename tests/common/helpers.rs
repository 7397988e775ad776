use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tally::{Descriptor, Output, OutputBuilder, Target};

// Common test constants
pub const TEST_DIGEST: &str =
    "sha256:2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae";
pub const TEST_ERROR_MESSAGE: &str = "registry refused the blob";

/// Creates test content of the specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Creates a descriptor whose digest is unique for `seed`
pub fn create_test_descriptor(seed: usize, size: u64) -> Descriptor {
    Descriptor::new(format!("sha256:{:064x}", seed + 1), size)
}

// === Output Helpers ===

/// Output drawing bars, as if standard output were a terminal
pub fn create_instrumented_output() -> Output {
    OutputBuilder::new().terminal_probe(|| true).build()
}

/// Output with bars requested but no terminal attached
pub fn create_non_terminal_output() -> Output {
    OutputBuilder::new().terminal_probe(|| false).build()
}

/// Output with bars turned off, on a terminal
pub fn create_disabled_output() -> Output {
    OutputBuilder::hidden().terminal_probe(|| true).build()
}

// === Targets ===

/// Target recording every blob pushed to it
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pushes: Mutex<Vec<(Descriptor, Vec<u8>)>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushes(&self) -> Vec<(Descriptor, Vec<u8>)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

impl Target for RecordingTarget {
    type Error = io::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> io::Result<()> {
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes)?;
        self.pushes
            .lock()
            .unwrap()
            .push((expected.clone(), bytes));
        Ok(())
    }
}

/// Target reading part of the blob, then failing
#[derive(Debug)]
pub struct FailingTarget {
    read_before_failure: usize,
    calls: AtomicUsize,
}

impl FailingTarget {
    pub fn new(read_before_failure: usize) -> Self {
        Self {
            read_before_failure,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Target for FailingTarget {
    type Error = io::Error;

    fn push(&self, _expected: &Descriptor, content: &mut dyn Read) -> io::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut partial = vec![0; self.read_before_failure];
        content.read_exact(&mut partial)?;
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            TEST_ERROR_MESSAGE,
        ))
    }
}

// === Readers and Writers ===

/// Reader handing out at most `chunk` bytes per read
#[derive(Debug)]
pub struct ChunkedReader {
    data: Vec<u8>,
    offset: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            offset: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.data[self.offset..];
        let n = remaining.len().min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.offset += n;
        Ok(n)
    }
}

/// Reader yielding some bytes, then an error
#[derive(Debug)]
pub struct BrokenReader {
    data: Vec<u8>,
    served: bool,
}

impl BrokenReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            served: false,
        }
    }
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream cut"));
        }
        self.served = true;
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        Ok(n)
    }
}

/// Writer sharing its buffer with the test
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("Log output is not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
