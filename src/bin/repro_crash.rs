//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --features repro --bin repro_crash -- <crash_file>
//!
//! Set `RUST_LOG` to control the table's tracing output; the default shows
//! every strategy choice and fast-path hit.

use std::fs;

use tracing_subscriber::EnvFilter;

#[path = "shared/fuzz_ops.rs"]
mod fuzz_ops;

use fuzz_ops::{FuzzOp, Replay};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("piecework=trace")),
        )
        .with_writer(std::io::stderr)
        .init();

    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            std::process::exit(1);
        }
    };
    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let mut replay = Replay::new();
    let mut remaining = &data[..];
    let mut op_num = 0;

    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;
        eprintln!("Op {}: {:?} (cursor {})", op_num, op, replay.cursor);
        eprintln!("  Before: len={} {:?}", replay.table.len(), replay.table.render());
        replay.apply(op);
        eprintln!(
            "  After: len={} pieces={} {:?}",
            replay.table.len(),
            replay.table.piece_count(),
            replay.table.render()
        );
        op_num += 1;
    }

    eprintln!("\nFinal state: {:?}", replay.table);
    eprintln!("All checks passed!");
}
