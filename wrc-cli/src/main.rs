//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = wrc_cli::run() {
        eprintln!("wrc: {err}");
        std::process::exit(1);
    }
}
