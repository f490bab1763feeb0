//! Quartz TUI - terminal dashboard for the Quartz trading platform.

use quartz_tui::{App, Config, Result, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns the terminal, so logs go to a rolling file instead.
    let log_dir = config::log_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let file_appender = tracing_appender::rolling::daily(log_dir, "quartz-tui.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quartz_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
