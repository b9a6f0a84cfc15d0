use clap::ArgMatches;
use tracing::error;

use credctl_core::events;

mod delete_ram_policy;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("delete-ram-policy", sub_matches)) => {
            delete_ram_policy::handle_delete_ram_policy_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
