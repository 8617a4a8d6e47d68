//! infotree command-line interface

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use infotree::topology::read_seeds;
use infotree::common::Overrides;
use infotree::{
    Category, Config, RespInfoFetcher, Session, SystemResolver, TopologyBuilder, Walker,
};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "infotree")]
#[command(about = "Show INFO sections across a replication topology as a tree")]
#[command(version)]
struct Cli {
    /// Credential sent with AUTH to every node
    #[arg(short = 'a', long, global = true)]
    auth: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read seeds from this file instead of stdin
    #[arg(long, global = true)]
    seeds: Option<PathBuf>,

    /// Per-node fetch timeout (e.g. 500ms, 5s)
    #[arg(long, global = true)]
    timeout: Option<String>,

    /// Mark unreachable nodes in the output instead of aborting
    #[arg(long, global = true)]
    keep_going: bool,

    /// Starts an interactive shell when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Memory usage
    Memory(Keys),
    /// Replication role and replica links (shows nothing without keys)
    Replication(Keys),
    /// Server version, uptime and process details
    Server(Keys),
    /// Client connections
    Clients(Keys),
    /// General statistics
    Stats(Keys),
    /// RDB and AOF persistence
    Persistence(Keys),
    /// CPU consumption
    Cpu(Keys),
    /// Cluster mode
    Cluster(Keys),
    /// Per-database key counts
    Keyspace(Keys),
}

#[derive(Args)]
struct Keys {
    /// Only show lines starting with one of these prefixes
    keys: Vec<String>,
}

impl Commands {
    fn into_query(self) -> (Category, Vec<String>) {
        match self {
            Commands::Memory(k) => (Category::Memory, k.keys),
            Commands::Replication(k) => (Category::Replication, k.keys),
            Commands::Server(k) => (Category::Server, k.keys),
            Commands::Clients(k) => (Category::Clients, k.keys),
            Commands::Stats(k) => (Category::Stats, k.keys),
            Commands::Persistence(k) => (Category::Persistence, k.keys),
            Commands::Cpu(k) => (Category::Cpu, k.keys),
            Commands::Cluster(k) => (Category::Cluster, k.keys),
            Commands::Keyspace(k) => (Category::Keyspace, k.keys),
        }
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_level.as_str())
            .unwrap_or("warn"),
    );

    if let Err(err) = run(cli, config).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: infotree::Result<Config>) -> anyhow::Result<()> {
    let mut config = config.context("failed to load configuration")?;
    config.apply(Overrides {
        auth: cli.auth,
        seeds: cli.seeds,
        timeout: cli.timeout,
        keep_going: cli.keep_going,
    });

    let fetcher = RespInfoFetcher::new(config.auth.clone(), config.fetch_timeout()?);

    let seeds = match &config.seeds {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open seed file {}", path.display()))?;
            read_seeds(file).await?
        }
        None => read_seeds(tokio::io::stdin()).await?,
    };

    let forest = TopologyBuilder::new(&fetcher, &SystemResolver)
        .with_failure_policy(config.on_failure)
        .build(&seeds)
        .await?;
    let session = Session::new(
        forest,
        Walker::new(&fetcher).with_failure_policy(config.on_failure),
    );

    let mut stdout = std::io::stdout();
    match cli.command {
        Some(command) => {
            let (category, keys) = command.into_query();
            session.query(category, keys, &mut stdout).await?;
        }
        None if config.seeds.is_some() => {
            let input = BufReader::new(tokio::io::stdin());
            session.run_interactive(input, &mut stdout).await?;
        }
        None => {
            // stdin already held the seeds
            let tty = tokio::fs::File::open("/dev/tty")
                .await
                .context("interactive mode needs a terminal when seeds are read from stdin")?;
            session.run_interactive(BufReader::new(tty), &mut stdout).await?;
        }
    }

    Ok(())
}
