use anyhow::Context;
use clap::Parser;
use log::{error, info};
use oled_stats::config::ActiveWindow;
use oled_stats::core::{Scheduler, ShutdownToken};
use oled_stats::display::{DisplaySink, Oled};
use oled_stats::sources::Telemetry;
use tokio::signal::unix::{signal, SignalKind};

/// oled-stats - telemetry display daemon for an SSD1306 OLED
#[derive(Parser, Debug)]
#[command(name = "oled-stats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "1")]
    debug: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override the CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("starting oled-stats v{}", env!("CARGO_PKG_VERSION"));

    // Active hours come from the environment; anything unusable silently
    // falls back to the defaults.
    let window = ActiveWindow::from_env();

    let mut sink = Oled::open().context("initializing display")?;
    sink.blank().context("blanking display at startup")?;

    let telemetry = Telemetry::probe().context("caching memory total")?;

    let shutdown = ShutdownToken::new();
    spawn_signal_listener(shutdown.clone());

    let mut scheduler = Scheduler::new(window, telemetry, sink, shutdown);
    scheduler.run()?;

    info!("shutdown complete");
    Ok(())
}

/// Route SIGTERM and SIGINT to the shutdown token.
///
/// The listener runs a single-threaded runtime on its own thread so the
/// render loop itself stays a plain synchronous loop.
fn spawn_signal_listener(shutdown: ShutdownToken) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("failed to start signal listener: {e}");
                return;
            }
        };
        runtime.block_on(async move {
            let mut terminate = match signal(SignalKind::terminate()) {
                Ok(stream) => stream,
                Err(e) => {
                    error!("cannot listen for SIGTERM: {e}");
                    return;
                }
            };
            let mut interrupt = match signal(SignalKind::interrupt()) {
                Ok(stream) => stream,
                Err(e) => {
                    error!("cannot listen for SIGINT: {e}");
                    return;
                }
            };
            tokio::select! {
                _ = terminate.recv() => info!("received SIGTERM, shutting down"),
                _ = interrupt.recv() => info!("received SIGINT, shutting down"),
            }
            shutdown.trigger();
        });
    });
}
