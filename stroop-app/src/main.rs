mod app;
mod cli;
mod display;

use app::App;
use clap::Parser;
use cli::Args;
use tracing_subscriber::EnvFilter;

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    let app = App::new(args)?;
    app.run()?;

    Ok(())
}
