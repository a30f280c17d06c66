use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = branchbank::app::run(std::env::args()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
