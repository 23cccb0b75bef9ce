use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use mackerel_plugin_fluentd::{ConfigOverrides, Mode, PluginConfig};

#[derive(Parser, Debug)]
#[command(name = "mackerel-plugin-fluentd")]
#[command(about = "Mackerel agent plugin reporting fluentd buffer queue and retry metrics")]
struct Args {
    /// fluentd monitor_agent host [default: localhost]
    #[arg(long)]
    host: Option<String>,

    /// fluentd monitor_agent port [default: 24220]
    #[arg(long)]
    port: Option<u16>,

    /// State file path [default: <workdir>/mackerel-plugin-fluentd-<host>-<port>]
    #[arg(long)]
    tempfile: Option<PathBuf>,

    /// Config file (TOML, YAML or JSON) with host, port and tempfile
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            tempfile: self.tempfile.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = PluginConfig::load(args.config.as_deref(), args.overrides())?;
    let mode = Mode::from_env();
    debug!("Running in {} mode against {}", mode.label(), config.plugins_url());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    mackerel_plugin_fluentd::run(&config, mode, &mut out)
}

/// Log to stderr; stdout carries the agent protocol.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
