fn main() {
    if let Err(e) = rolechat::cli::main() {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
