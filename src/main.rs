use clap::Parser;
use gym_payments::application::lifecycle::{DEFAULT_CURRENCY, PaymentLifecycle};
use gym_payments::domain::ports::{PaymentGatewayBox, PaymentRepositoryBox};
use gym_payments::infrastructure::gateway::SimulatedGateway;
use gym_payments::infrastructure::in_memory::InMemoryPaymentRepository;
use gym_payments::interfaces::csv::batch::BatchRunner;
use gym_payments::interfaces::csv::command_reader::CommandReader;
use gym_payments::interfaces::csv::payment_writer::PaymentWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payment commands CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Currency used for card charges
    #[arg(long, env = "GYM_PAYMENTS_CURRENCY", default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Simulated gateway declines card charges above this amount
    #[arg(long, env = "GYM_PAYMENTS_DECLINE_ABOVE")]
    decline_above: Option<Decimal>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "gym_payments=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .init();
}

fn open_repository(db_path: Option<PathBuf>) -> Result<PaymentRepositoryBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            use gym_payments::infrastructure::rocksdb::RocksDBStore;
            tracing::info!(path = %path.display(), "Using RocksDB storage");
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryPaymentRepository::new()))
        }
        None => Ok(Box::new(InMemoryPaymentRepository::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let repository = open_repository(cli.db_path)?;
    let gateway: PaymentGatewayBox = match cli.decline_above {
        Some(limit) => Box::new(SimulatedGateway::with_decline_above(limit)),
        None => Box::new(SimulatedGateway::new()),
    };
    let lifecycle = PaymentLifecycle::new(repository, gateway).with_currency(cli.currency);

    // Replay commands
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let mut runner = BatchRunner::new(&lifecycle);
    for cmd_result in reader.commands() {
        match cmd_result {
            Ok(cmd) => {
                if let Err(e) = runner.apply(cmd).await {
                    error!(error = %e, "Error processing command");
                }
            }
            Err(e) => {
                error!(error = %e, "Error reading command");
            }
        }
    }

    let payments = lifecycle.list().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(&payments).into_diagnostic()?;

    Ok(())
}
