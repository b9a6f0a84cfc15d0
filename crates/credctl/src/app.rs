use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("credctl")
        .about("Manage cloud credentials provisioned for OpenShift CredentialsRequests")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show info-level logs on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(delete_ram_policy_command())
}

fn delete_ram_policy_command() -> Command {
    Command::new("delete-ram-policy")
        .about("Detach and delete the RAM policies created for a set of CredentialsRequests")
        .arg(
            Arg::new("name")
                .long("name")
                .help("User-defined name for all created Alibaba Cloud resources (can be separate from the cluster's infra-id)")
                .required(true),
        )
        .arg(
            Arg::new("credentials-requests-dir")
                .long("credentials-requests-dir")
                .help("Directory containing files of CredentialsRequests whose RAM policies should be deleted")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("user-name")
                .long("user-name")
                .help("The RAM user the policies are attached to")
                .required(true),
        )
        .arg(
            Arg::new("root-access-key")
                .long("root-access-key")
                .help("Access key id of a RAM identity allowed to call DetachPolicyFromUser and DeletePolicy (falls back to ALIBABA_CLOUD_ACCESS_KEY_ID)"),
        )
        .arg(
            Arg::new("root-access-key-secret")
                .long("root-access-key-secret")
                .help("Access key secret matching --root-access-key (falls back to ALIBABA_CLOUD_ACCESS_KEY_SECRET)"),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .help("Alibaba Cloud region; only required for GovCloud"),
        )
        .arg(
            Arg::new("ignore-missing")
                .long("ignore-missing")
                .help("Treat policies that are already detached or deleted as done")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("enable-tech-preview")
                .long("enable-tech-preview")
                .help("Also process CredentialsRequests marked TechPreviewNoUpgrade")
                .action(ArgAction::SetTrue),
        )
}
