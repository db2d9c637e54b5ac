use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(e) = beansql_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr so statements on stdout stay pipeable. Filter via `BEANSQL_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("BEANSQL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
