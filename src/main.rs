fn main() {
    if let Err(e) = ln_channel_report::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
