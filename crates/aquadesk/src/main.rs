#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "aquadesk")]
#[command(about = "Terminal admin console for a water utility")]
struct Args {
    /// Path to the data directory (default: ~/.aquadesk/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Backend base URL, overriding config.yaml
    #[arg(short, long)]
    api_url: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Screen to open first: dashboard or a resource such as bills
    #[arg(short, long, default_value = "dashboard")]
    screen: String,

    /// Rows per page on list screens
    #[arg(long)]
    page_size: Option<usize>,

    /// Customer shown on the dashboard
    #[arg(long)]
    customer_id: Option<i64>,
}

#[cfg(feature = "native")]
fn main() -> color_eyre::Result<()> {
    use std::rc::Rc;
    use std::sync::Arc;

    use aquadesk::api::HttpBackend;
    use aquadesk::config::{AppConfig, ConfigOverrides, default_data_dir};
    use aquadesk::platform::FileStorage;
    use aquadesk::state::ScreenId;
    use aquadesk::{App, init_logging};
    use color_eyre::eyre::eyre;

    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let start = ScreenId::parse(&args.screen)
        .ok_or_else(|| eyre!("unknown screen '{}'", args.screen))?;

    let config = AppConfig::load(&data_dir)?.with_overrides(ConfigOverrides {
        api_url: args.api_url,
        page_size: args.page_size,
        customer_id: args.customer_id,
    })?;
    tracing::info!(
        api_url = %config.api_url,
        data_dir = %data_dir.display(),
        "Configuration loaded"
    );

    let backend = HttpBackend::new(&config.api_url, config.request_timeout())?;
    let storage = FileStorage::new(&data_dir);

    let mut app = App::new(config, Arc::new(backend), Rc::new(storage), start);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    // The web build embeds the library; there is no terminal entry point
    panic!("This binary requires the 'native' feature.");
}
