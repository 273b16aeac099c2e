use std::process;

fn main() {
    if let Err(e) = nirmanakaya::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
