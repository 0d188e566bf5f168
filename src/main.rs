use clap::Parser;
use std::process;
use tank_processor::cli::Args;
use tank_processor::{DiscoveryMode, TelemetryProcessor};

fn main() {
    let args = Args::parse();

    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let window = args.window()?;
    let output_path = args.get_output_path(&args.input_path);
    let mode = if args.scan {
        DiscoveryMode::Scan
    } else {
        DiscoveryMode::Archive
    };

    let processor = TelemetryProcessor::new(
        args.input_path.clone(),
        output_path,
        window,
        args.gas_config(),
        mode,
    )?;

    // Summary is reported by the processor itself.
    processor.run()?;
    Ok(())
}

fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tank_processor={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
