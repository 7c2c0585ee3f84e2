//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = starpath_cli::run() {
        eprintln!("starpath: {err}");
        std::process::exit(1);
    }
}
