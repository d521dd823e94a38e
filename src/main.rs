//! clade-counts CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = clade_counts::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
