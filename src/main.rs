//! QPU Console CLI
//!
//! Command-line entry point:
//! - Interactive console (default)
//! - One-shot questions to the assistant
//! - Dashboard, workload and graph reports
//! - Web UI host

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use qpu_console::backend::{AnalysisBackend, BackendClient};
use qpu_console::chat::{ChatSession, SendOutcome};
use qpu_console::config::{generate_default_config, Config};
use qpu_console::console::{describe_outcome, Console};
use qpu_console::dashboard::{build_cards, DashboardLoader, DashboardState, DASHBOARD_ERROR_MESSAGE};
use qpu_console::graphs::{self, GraphKind};
use qpu_console::render::format_grouped;
use qpu_console::{logging, server};

#[derive(Parser)]
#[command(name = "qpu-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "QPU usage dashboard and analysis assistant")]
#[command(long_about = "QPU Console talks to a QPU usage analysis service.\nBrowse leased-block metrics, ask the assistant questions, and host the web UI.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./qpu-console.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis backend URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console (default)
    Console {
        /// Open downloaded graphs in the system viewer
        #[arg(long)]
        open: bool,
    },

    /// Ask the assistant a single question
    Ask {
        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
        /// Where to save an attached graph (default: graph dir)
        #[arg(long)]
        graph_out: Option<PathBuf>,
    },

    /// Show the dashboard cards
    Dashboard,

    /// List daily workload counts
    Workloads,

    /// Download a quick-analysis graph (costs, workloads, efficiency)
    Graph {
        kind: GraphKind,
        /// Output file (default: graph dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Open the graph after saving
        #[arg(long)]
        open: bool,
    },

    /// Host the web UI and forward /api to the backend
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// Built UI assets
        #[arg(long)]
        ui_dir: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    let command = cli.command.unwrap_or(Commands::Console { open: false });

    match command {
        Commands::Console { open } => {
            let (backend, graph_dir) = connect(&config)?;
            Console::new(backend, graph_dir).open_graphs(open).run().await?;
        }

        Commands::Ask { message, graph_out } => {
            let (backend, graph_dir) = connect(&config)?;
            let session = ChatSession::new(backend);
            let outcome = session.send(&message.join(" ")).await;

            match (&outcome, graph_out) {
                (SendOutcome::Replied(reply), Some(path)) => {
                    println!("{}", reply.text);
                    if let Some(graph) = &reply.graph {
                        graphs::save_image(&path, &graphs::decode_inline(graph)?)?;
                        println!("Graph saved to {}", path.display());
                    }
                }
                (SendOutcome::Replied(_), None) => {
                    println!("{}", describe_outcome(&outcome, &graph_dir));
                }
                (SendOutcome::Failed(message), _) => bail!("{}", message.text),
                (SendOutcome::Rejected(_), _) => bail!("Message is empty"),
            }
        }

        Commands::Dashboard => {
            let (backend, _) = connect(&config)?;
            let loader = DashboardLoader::new(backend);
            match loader.refresh().await {
                DashboardState::Ready(data) => {
                    for card in build_cards(&data) {
                        println!("{}", card);
                    }
                }
                _ => bail!(DASHBOARD_ERROR_MESSAGE),
            }
        }

        Commands::Workloads => {
            let (backend, _) = connect(&config)?;
            let records = backend.daily_workloads().await?;

            if records.is_empty() {
                println!("No workload data yet.");
            } else {
                println!("{:<12} {:>12}", "Date", "Workloads");
                println!("{}", "-".repeat(25));

                for record in records {
                    println!(
                        "{:<12} {:>12}",
                        record.date_label(),
                        format_grouped(record.workloads.unwrap_or(0.0))
                    );
                }
            }
        }

        Commands::Graph { kind, output, open } => {
            let (backend, graph_dir) = connect(&config)?;
            let bytes = backend.graph(kind).await?;
            let path = output.unwrap_or_else(|| graph_dir.join(kind.file_name()));
            graphs::save_image(&path, &bytes)?;
            println!("{} saved to {}", kind.label(), path.display());

            if open {
                graphs::open_in_browser(&path.to_string_lossy())
                    .with_context(|| format!("opening {}", path.display()))?;
            }
        }

        Commands::Serve { host, port, ui_dir } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(ui_dir) = ui_dir {
                config.server.ui_dir = ui_dir;
            }
            server::serve(&config.server, &config.backend).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Backend client and graph directory from config
fn connect(config: &Config) -> anyhow::Result<(Arc<dyn AnalysisBackend>, PathBuf)> {
    let client = BackendClient::new(config.backend.client_config())
        .with_context(|| format!("invalid backend URL {:?}", config.backend.url))?;
    Ok((Arc::new(client), PathBuf::from(&config.backend.graph_dir)))
}
