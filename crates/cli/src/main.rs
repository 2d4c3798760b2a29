use amenimap_cli::{Cli, run};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amenimap=info,amenimap_cli=info,info".into()),
        )
        .init();

    let cli = Cli::parse();
    info!("amenimap {}", amenimap::VERSION);

    run(&cli)
}
