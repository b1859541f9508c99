use anyhow::Result;
use clap::{Parser, Subcommand};

// Use the library modules
use glsm::commands;

#[derive(Parser)]
#[clap(name = "glsm")]
#[clap(about = "gls release installer and version manager")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a specific version of gls
    Install {
        /// Version to install (e.g., 0.3.0, latest)
        version: String,
        /// Download timeout in seconds (overrides the configured default)
        #[clap(long)]
        timeout: Option<u64>,
        /// Skip the post-install 'gls --version' self-test
        #[clap(long)]
        no_self_test: bool,
    },
    /// Uninstall a specific version
    Uninstall {
        /// Version to uninstall
        version: String,
        /// Skip the confirmation prompt
        #[clap(long)]
        yes: bool,
    },
    /// List installed versions
    List,
    /// List versions available in the release table
    Available,
    /// Switch to a specific version globally
    Use {
        /// Version to use globally
        version: String,
    },
    /// Check and repair environment setup
    Doctor,
    /// Initialize shell configuration
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install {
            version,
            timeout,
            no_self_test,
        } => commands::install::install_version(&version, timeout, no_self_test),
        Commands::Uninstall { version, yes } => {
            commands::uninstall::uninstall_version(&version, yes)
        }
        Commands::List => commands::list::list_versions(),
        Commands::Available => commands::available::list_available_versions(),
        Commands::Use { version } => commands::use_version::use_version(&version),
        Commands::Doctor => commands::doctor::check_environment(),
        Commands::Init => commands::init::init_shell(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
