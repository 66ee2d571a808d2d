use clap::Parser;
use eslv::{
    cli::{relaunch_params, Cli},
    headless,
};
use eslv_core::{config::Config, AnsiMarkup, PlainMarkup};
use std::io::{self, IsTerminal};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/eslv-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("eslv debug log started, tail -f /tmp/eslv-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config not loaded, using defaults");
        Config::defaults()
    });

    let policy = config.headers.policy().with_show_all(cli.all);
    let index = eslv_core::Parser::new(&policy).parse_path(&cli.file)?;
    let mut view = cli.view(&config);

    if cli.headless {
        view.refresh(index.events());
        let stdout = io::stdout().lock();
        let format = &config.ui.timestamp_format;
        if stdout.is_terminal() {
            headless::write_events(index.events(), &view, format, &mut AnsiMarkup::new(stdout))?;
        } else {
            headless::write_events(index.events(), &view, format, &mut PlainMarkup::new(stdout))?;
        }
        return Ok(());
    }

    let session = eslv_tui::run(index, view, config)?;
    if let Some(params) = relaunch_params(&session, cli.all) {
        println!("{params}");
    }
    Ok(())
}
