fn main() {
    if let Err(error) = seqlinq_cli::run() {
        // Tracing is initialized inside run() after argument parsing.
        tracing::error!(error = %format!("{error:#}"), "query failed");
        std::process::exit(1);
    }
}
