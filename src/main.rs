fn main() {
    if let Err(err) = sales_dash::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
