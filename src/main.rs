#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use tictactoe_server::{init_logging, server, ResetPolicy, ServerConfig, TransportKind, DEFAULT_PORT};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host the shared board and wait for players and spectators.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = TransportKind::WebSocket, help = "Wire to accept clients on")]
        transport: TransportKind,
        #[arg(long, value_enum, default_value_t = ResetPolicy::Anyone, help = "Who may reset the board")]
        reset_policy: ResetPolicy,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            transport,
            reset_policy,
        } => {
            let config = ServerConfig::with_addr(&host, port)
                .transport(transport)
                .reset_policy(reset_policy);
            server::run(config).await?;
        }
    }
    Ok(())
}
