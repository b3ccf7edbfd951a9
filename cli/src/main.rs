mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, inventory, parse};
use nxprof_common::{config::Config, error, warn};
use terminal::{logging, print, prompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let _log_guard = logging::init_logging(&commands.log_file, commands.verbose)?;

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    let outcome = match commands.command {
        None | Some(Commands::Check) => {
            let credentials = prompt::credentials(commands.username.clone())?;
            if !credentials.is_complete() {
                error!("Username and password are required");
                return Ok(());
            }
            print::header("checking port profiles", cfg.quiet);
            tokio::select! {
                res = check::check(&credentials, &cfg) => res,
                _ = tokio::signal::ctrl_c() => {
                    warn!("Script interrupted by user");
                    return Ok(());
                }
            }
        }
        Some(Commands::Inventory) => {
            print::header("building inventory", cfg.quiet);
            inventory::inventory(&cfg)
        }
        Some(Commands::Parse {
            usage,
            profiles,
            host,
            csv,
        }) => {
            print::header("parsing saved output", cfg.quiet);
            parse::parse(&usage, profiles.as_deref(), &host, csv, &cfg)
        }
    };

    if let Err(e) = &outcome {
        error!("Unexpected error: {e:#}");
    }
    print::end_of_program(cfg.quiet);
    outcome
}
