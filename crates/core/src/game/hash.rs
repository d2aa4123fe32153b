//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep fingerprinting separate from simulation control code.
//! It does not own replay execution or save-file checksums.

use std::io::{self, Write};

use xxhash_rust::xxh3::Xxh3;

use super::*;

/// Feeds serialized bytes straight into the hasher.
struct HashSink(Xxh3);

impl Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RunState {
    /// xxh3-64 over the canonical JSON encoding of the whole run.
    pub fn snapshot_hash(&self) -> serde_json::Result<u64> {
        let mut sink = HashSink(Xxh3::new());
        serde_json::to_writer(&mut sink, self)?;
        Ok(sink.0.digest())
    }
}
