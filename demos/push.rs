//! Push a few random blobs to a local directory, then unpack one of them,
//! drawing progress bars when run in a terminal.
//!
//! `RUST_LOG=tally=debug cargo run --example push`

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;
use std::thread;

use color_eyre::{eyre::Report, Result};
use console::{style, Term};
use rand::RngCore;
use tally::{Descriptor, OutputBuilder, Target};
use tracing_subscriber::EnvFilter;

/// Stores each blob as a file named after its digest.
struct DirectoryTarget {
    root: PathBuf,
}

impl Target for DirectoryTarget {
    type Error = io::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> io::Result<()> {
        let mut file = File::create(self.root.join(expected.encoded()))?;
        io::copy(content, &mut file)?;
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let root = std::env::temp_dir().join("tally-demo");
    fs::create_dir_all(&root)?;

    let output = OutputBuilder::new()
        .debug(true)
        .terminal_probe(|| Term::stdout().is_term())
        .build();
    let target = output.wrap_target(DirectoryTarget { root: root.clone() });
    let logger = target.logger();

    let blobs: Vec<(Descriptor, Vec<u8>)> = (0..4)
        .map(|i| {
            let mut blob = vec![0; (i + 1) * 4 * 1024 * 1024];
            rand::rng().fill_bytes(&mut blob);
            let digest = format!("sha256:{:016x}{:048x}", rand::rng().next_u64(), i);
            (Descriptor::new(digest, blob.len() as u64), blob)
        })
        .collect();

    thread::scope(|scope| -> Result<()> {
        let handles: Vec<_> = blobs
            .iter()
            .map(|(descriptor, blob)| {
                let target = &target;
                scope.spawn(move || target.push(descriptor, &mut blob.as_slice()))
            })
            .collect();
        for handle in handles {
            handle
                .join()
                .map_err(|_| Report::msg("push worker panicked"))??;
        }
        Ok(())
    })?;
    target.wait();
    logger.infof(format_args!(
        "{} Pushed {} blobs to {}",
        style("✔").green(),
        blobs.len(),
        root.display()
    ));

    let (descriptor, _) = &blobs[0];
    let file = File::open(root.join(descriptor.encoded()))?;
    let (logger, mut reader) = output.instrument_unpack(descriptor.size(), file);
    logger.debugf(format_args!("Unpacking {}", descriptor.short_digest()));
    let unpacked = io::copy(&mut reader, &mut io::sink())?;
    reader.close();
    logger.wait();
    logger.infof(format_args!("Unpacked {}", tally::format_bytes(unpacked)));

    fs::remove_dir_all(&root)?;
    Ok(())
}
