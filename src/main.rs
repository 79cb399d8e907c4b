use lead_widget::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the transcript on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cli::run().await?;
    Ok(())
}
