use clap::Parser;
use cpass::cli::{Cli, Commands, Context};
use tracing_subscriber::EnvFilter;

/// Environment variable read by the log filter, e.g. `CPASS_LOG=debug`.
const LOG_ENV: &str = "CPASS_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        cpass::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> cpass::errors::Result<()> {
    let ctx = Context::from_cli(cli)?;

    match cli.command {
        Commands::Init => cpass::cli::commands::init::execute(&ctx),
        Commands::Ls => cpass::cli::commands::list::execute(&ctx),
        Commands::Find { ref substring } => cpass::cli::commands::find::execute(&ctx, substring),
        Commands::Open { ref id, print } => cpass::cli::commands::open::execute(&ctx, id, print),
        Commands::Save { ref id, length } => cpass::cli::commands::save::execute(&ctx, id, length),
        Commands::Rm { ref id, force } => cpass::cli::commands::remove::execute(&ctx, id, force),
    }
}

/// Log to stderr.  `CPASS_LOG` takes precedence; otherwise `--verbose`
/// selects `debug` and the default is `warn`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
