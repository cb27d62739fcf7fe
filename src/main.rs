use std::path::PathBuf;

use anyhow::{Context, bail};
use channel_bridge::{
    BinaryMessenger, BridgeMethod, Invocation, LogLevel, runtime::run_stdio,
};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use wiredash::{
    CHANNEL_NAME, WiredashPlugin,
    config::{BridgeConfig, EnvConfigSource},
    logger::init_tracing,
    schema::write_schema,
};

#[derive(Parser, Debug)]
#[command(
    name = "wiredash",
    about = "Answers method calls on the wiredash channel",
    version
)]
struct Cli {
    /// Log level override (trace, debug, info, warn, error, critical)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Also write rolling log files into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the channel as line-delimited JSON-RPC on stdin/stdout
    Serve,

    /// Make one call in-process and print the answer
    Call(CallArgs),

    /// List the methods the channel answers
    Methods,

    /// Emit JSON-Schema for the channel's wire types
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct CallArgs {
    method: String,

    /// Arguments as a JSON document
    #[arg(long)]
    arguments: Option<String>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    #[arg(long, default_value = "schemas")]
    out: PathBuf,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = EnvConfigSource::default();
    let config = BridgeConfig::load(&source)?.with_overrides(cli.log_level, cli.log_dir);
    let _log_guard = init_tracing(config.log_level, config.log_dir.as_deref())?;
    source.log_load_outcome();

    let messenger = BinaryMessenger::new();
    // a second registration is a startup error, never something we paper over
    let _registration = WiredashPlugin::register(&messenger)
        .with_context(|| format!("could not register the `{CHANNEL_NAME}` channel"))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let answered = run_stdio(&messenger, CHANNEL_NAME).await?;
            info!(answered, "stdin closed, shutting down");
        }
        Commands::Call(args) => {
            let invocation = match args.arguments {
                Some(raw) => {
                    let value =
                        serde_json::from_str(&raw).context("--arguments is not valid JSON")?;
                    Invocation::with_arguments(args.method, value)
                }
                None => Invocation::new(args.method),
            };
            let response = match messenger.invoke(CHANNEL_NAME, &invocation) {
                Ok(response) => response,
                Err(err) => {
                    error!(error = %err, "call failed");
                    bail!(err);
                }
            };
            println!("{}", serde_json::to_string(&response)?);
        }
        Commands::Methods => {
            for name in BridgeMethod::names() {
                println!("{name}");
            }
        }
        Commands::Schema(args) => {
            for path in write_schema(&args.out)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
