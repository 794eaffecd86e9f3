use anyhow::Result;
use bitlings_lib::app::{App, RunMode};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "server")]
    mode: RunMode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Seed for the world RNG, overriding the config file
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    bitlings_core::init_logging();
    let args = Args::parse();

    let app = App::new(&args.config, args.seed)?;
    tracing::info!(
        config = %app.config_path.display(),
        mode = ?args.mode,
        seed = ?app.config.world.seed,
        "Starting Bitlings"
    );
    app.run(args.mode).await
}
