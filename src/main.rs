mod app;
mod cli;
mod constants;
mod domain;
mod error;
mod layout;
mod storage;
mod sync;

fn main() {
    if std::env::args().len() > 1 {
        cli::run_cli();
        return;
    }

    if let Err(e) = app::run_ui() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
