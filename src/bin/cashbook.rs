use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};

use cashbook::{
    ChartMode, Config, DEFAULT_SLOT_NAME, Error, StorageBackend, TransactionEntry, TransactionForm,
    TransactionId, TransactionQuery, TypeFilter,
    commands::{self, DELETE_CONFIRMATION_PROMPT, TransactionEdit},
    format_currency,
    logging::{level_from_verbosity, setup_logging},
};

/// Record income and expenses and see where the money went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database holding the transactions. Takes
    /// precedence over `--data-dir`.
    #[arg(long, env = "CASHBOOK_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Directory to keep the transactions in as JSON files.
    #[arg(long, env = "CASHBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep transactions in memory only. Nothing is saved. Overrides
    /// `--db-path` and `--data-dir`.
    #[arg(long)]
    memory: bool,

    /// The name of the storage slot holding the transactions.
    #[arg(long, env = "CASHBOOK_SLOT", default_value = DEFAULT_SLOT_NAME)]
    slot: String,

    /// Log more. Repeat for even more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// Either "income" or "expense".
        #[arg(long = "type", default_value = "income")]
        transaction_type: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        /// The date in the format YYYY-MM-DD.
        #[arg(long)]
        date: String,
    },
    /// Change an existing transaction. Fields that are not given are kept.
    Edit {
        id: u64,
        #[arg(long = "type")]
        transaction_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction.
    Delete {
        id: u64,
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },
    /// List transactions, optionally filtered.
    List {
        /// One of "all", "income" or "expense".
        #[arg(long = "type", default_value_t = TypeFilter::All)]
        type_filter: TypeFilter,
        /// Only show transactions whose description contains this text.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show the income, expense and profit/loss totals.
    Summary,
    /// Print the transaction chart options as JSON.
    Chart {
        /// Either "per-transaction" or "by-date".
        #[arg(long, default_value_t = ChartMode::PerTransaction)]
        mode: ChartMode,
    },
    /// Write the dashboard to an HTML file.
    Report {
        #[arg(long)]
        out: PathBuf,
        #[arg(long = "type", default_value_t = TypeFilter::All)]
        type_filter: TypeFilter,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = ChartMode::PerTransaction)]
        mode: ChartMode,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(level_from_verbosity(args.verbose));

    match run(args) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            print_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Error> {
    let config = Config {
        slot_name: args.slot,
        ..Config::new(storage_backend(args.db_path, args.data_dir, args.memory))
    };
    let mut store = config.open_store()?;

    match args.command {
        Command::Add {
            transaction_type,
            description,
            amount,
            date,
        } => commands::add(
            &mut store,
            &TransactionForm {
                transaction_type,
                description,
                amount,
                date,
            },
        ),
        Command::Edit {
            id,
            transaction_type,
            description,
            amount,
            date,
        } => commands::edit(
            &mut store,
            TransactionId::new(id),
            TransactionEdit {
                transaction_type,
                description,
                amount,
                date,
            },
        ),
        Command::Delete { id, yes } => {
            commands::delete(&mut store, TransactionId::new(id), |entry| {
                yes || confirm_delete(entry, &mut io::stdin().lock(), &mut io::stdout())
            })
        }
        Command::List {
            type_filter,
            search,
        } => Ok(commands::list(
            &store,
            &TransactionQuery::new(type_filter, &search),
        )),
        Command::Summary => Ok(commands::summary(&store)),
        Command::Chart { mode } => Ok(commands::chart(&store, mode)),
        Command::Report {
            out,
            type_filter,
            search,
            mode,
        } => commands::report(
            &store,
            &TransactionQuery::new(type_filter, &search),
            mode,
            &out,
        ),
    }
}

/// SQLite wins over a JSON directory. Without either, nothing is saved.
fn storage_backend(
    db_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    memory: bool,
) -> StorageBackend {
    match (db_path, data_dir) {
        _ if memory => StorageBackend::Memory,
        (Some(path), _) => StorageBackend::Sqlite(path),
        (None, Some(dir)) => StorageBackend::JsonDir(dir),
        (None, None) => {
            tracing::warn!("No --db-path or --data-dir given, changes will not be saved.");
            StorageBackend::Memory
        }
    }
}

fn confirm_delete(
    entry: &TransactionEntry,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> bool {
    let transaction = &entry.transaction;
    let prompt = write!(
        output,
        "{} {} {} {} \"{}\"\n{DELETE_CONFIRMATION_PROMPT} [y/N] ",
        entry.id,
        transaction.date(),
        transaction.transaction_type(),
        format_currency(transaction.amount()),
        transaction.description()
    )
    .and_then(|_| output.flush());

    if let Err(error) = prompt {
        tracing::error!("Could not write the prompt: {error}");
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::error!("Could not read the answer: {error}");
            false
        }
    }
}

fn print_error(error: &Error) {
    match error {
        Error::InvalidForm(errors) => {
            for (field, message) in errors.messages() {
                eprintln!("ERROR: {field}: {message}");
            }
        }
        error => eprintln!("ERROR: {error}"),
    }
}
