use clap::{Parser, Subcommand};

mod entropy_cmd;
mod rand_cmd;
mod selftest;

/// Random bit generation per NIST SP 800-90A/90C.
#[derive(Parser)]
#[command(name = "rbg")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log DRBG and entropy-source activity to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random bytes from an HMAC-DRBG seeded by the jitter source.
    Rand {
        /// Number of bytes.
        #[arg(short, long)]
        num: usize,
        /// Requested security strength in bits.
        #[arg(short, long, default_value = "128")]
        strength: u32,
        /// Reseed before every request (prediction resistance).
        #[arg(long)]
        resist: bool,
        /// Personalization string.
        #[arg(short, long, default_value = "")]
        persona: String,
        /// Output format (hex, raw).
        #[arg(short, long, default_value = "hex")]
        format: String,
    },
    /// Draw one entropy input string from the jitter source.
    Entropy {
        /// Minimum assessed min-entropy in bits.
        #[arg(long, default_value = "128")]
        min_entropy: usize,
        /// Minimum length in bits.
        #[arg(long, default_value = "128")]
        min_len: usize,
        /// Maximum length in bits.
        #[arg(long, default_value = "1000")]
        max_len: usize,
    },
    /// Run the known-answer self tests.
    Selftest,
}

/// Minimal stderr backend for the `log` facade. The library crates only
/// emit records; installing a logger is left to the binary.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Rand {
            num,
            strength,
            resist,
            persona,
            format,
        } => rand_cmd::run(*num, *strength, *resist, persona, format),
        Commands::Entropy {
            min_entropy,
            min_len,
            max_len,
        } => entropy_cmd::run(*min_entropy, *min_len, *max_len),
        Commands::Selftest => selftest::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
