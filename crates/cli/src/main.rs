fn main() {
    if let Err(e) = objgen_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
