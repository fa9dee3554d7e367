use std::fs;
use std::io::Read;

use anyhow::Context;
use presence::{build_matcher, PresenceConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: presence <business-name> [text-file]";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let business_name = args.next().context(USAGE)?;

    let config = match std::env::var_os("PRESENCE_CONFIG") {
        Some(path) => PresenceConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path.to_string_lossy()))?,
        None => PresenceConfig::default(),
    };
    init_tracing(&config.log_level);

    let text = match args.next() {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading text from stdin")?;
            buf
        }
    };

    let matcher = build_matcher(&config)?;
    let result = matcher.analyze(&text, &business_name);
    tracing::info!(
        business_name = %business_name,
        total_matches = result.total_matches,
        average_confidence = result.average_confidence,
        "analysis_complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
