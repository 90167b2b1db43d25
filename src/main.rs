use std::process;

fn main() {
    if let Err(err) = worldpop::run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
