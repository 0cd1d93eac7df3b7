fn main() {
    match tonio::run() {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("tonio: {err}");
            std::process::exit(1);
        }
    }
}
