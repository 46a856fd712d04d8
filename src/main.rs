//! stx-faucet CLI.
//!
//! Read-only surface over the faucet: one-shot status checks and a
//! watch mode that runs the snapshot poller until ctrl-c. Claiming and
//! funding need a signing wallet and happen wherever the library is
//! embedded behind one; the CLI never signs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use stx_faucet::chain::ChainReader;
use stx_faucet::config::{load_config_or_default, FaucetConfig};
use stx_faucet::faucet::format;
use stx_faucet::faucet::{DisplayState, FaucetContext, FaucetViewModel, SnapshotPoller};
use stx_faucet::lifecycle::{signals, Shutdown};
use stx_faucet::observability::{logging, metrics};
use stx_faucet::wallet::ReadOnlyWallet;

#[derive(Parser)]
#[command(name = "stx-faucet", version, about = "Headless client for an STX faucet contract")]
struct Cli {
    /// Path to a TOML config file. Defaults describe the mainnet faucet.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// One-shot read of the faucet balance and an address's eligibility.
    Status {
        /// STX address to check eligibility for.
        #[arg(long)]
        address: String,
    },
    /// Poll chain state on the configured interval until ctrl-c.
    Watch {
        /// STX address to watch eligibility for.
        #[arg(long)]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config_or_default(cli.config.as_deref())?;

    logging::init(&config.observability.log_filter);
    tracing::info!("stx-faucet v0.1.0 starting");
    tracing::info!(
        api_url = %config.network.api_url,
        contract = %config.contract.contract_id(),
        poll_interval_secs = config.polling.interval_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    match cli.command {
        Command::Status { address } => status(config, &address).await,
        Command::Watch { address } => watch(config, address).await,
    }
}

async fn status(config: FaucetConfig, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let reader = ChainReader::new(config.network.clone(), config.contract.clone())?;
    let snapshot = reader.snapshot(address).await?;

    println!(
        "Faucet balance: {} STX",
        format::format_stx(snapshot.faucet_balance_micro)
    );
    match snapshot.cooldown_blocks {
        0 => println!("{} can claim now", address),
        blocks => println!(
            "{} is cooling down: {} blocks (~{})",
            address,
            blocks,
            format::format_cooldown(blocks, config.network.blocks_per_hour)
        ),
    }
    Ok(())
}

async fn watch(config: FaucetConfig, address: String) -> Result<(), Box<dyn std::error::Error>> {
    let interval = Duration::from_secs(config.polling.interval_secs);
    let blocks_per_hour = config.network.blocks_per_hour;

    let wallet = Arc::new(ReadOnlyWallet::new(address));
    let ctx = FaucetContext::new(config, wallet)?;
    if !ctx.chain.is_healthy().await {
        // Degraded start is allowed; the poller recovers when the API does.
        tracing::warn!("Chain API unreachable at startup");
    }
    let vm = Arc::new(FaucetViewModel::new(ctx));
    vm.connect().await?;

    let shutdown = Shutdown::new();
    let poller = SnapshotPoller::new(vm.clone(), interval, shutdown.subscribe());
    let poller_handle = tokio::spawn(poller.run());

    tokio::select! {
        _ = signals::handle_signals(&shutdown) => {}
        _ = print_changes(&vm, &shutdown, blocks_per_hour) => {}
    }

    let _ = poller_handle.await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn print_changes(vm: &Arc<FaucetViewModel>, shutdown: &Shutdown, blocks_per_hour: u64) {
    let mut rx = shutdown.subscribe();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last: Option<DisplayState> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let state = vm.display_state();
                if last.as_ref() != Some(&state) {
                    describe(vm, &state, blocks_per_hour);
                    last = Some(state);
                }
            }
            _ = rx.recv() => break,
        }
    }
}

fn describe(vm: &Arc<FaucetViewModel>, state: &DisplayState, blocks_per_hour: u64) {
    let balance = vm
        .balance_display()
        .map(|b| format!("faucet balance {} STX", b))
        .unwrap_or_else(|| "balance unknown".to_string());

    match state {
        DisplayState::Disconnected => println!("disconnected"),
        DisplayState::Syncing => println!("syncing..."),
        DisplayState::Eligible => println!("eligible to claim ({})", balance),
        DisplayState::Cooldown { blocks_remaining } => println!(
            "cooling down: {} blocks (~{}) ({})",
            blocks_remaining,
            format::format_cooldown(*blocks_remaining, blocks_per_hour),
            balance
        ),
        // Read-only sessions never submit, but the watch loop prints
        // whatever the state machine says.
        DisplayState::Submitting { kind } => println!("submitting {}...", kind.as_str()),
        DisplayState::Settled { txid } => println!("sent: {}", txid),
        DisplayState::Rejected { reason } => println!("rejected: {}", reason),
    }
}
