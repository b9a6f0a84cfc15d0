use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use credctl_config::{TeardownConfig, TeardownOverrides, load_hierarchy, resolve_teardown_config};
use credctl_core::errors::CredctlError;
use credctl_core::events;
use credctl_core::ram::{AlibabaRamClient, RamClient};
use credctl_core::teardown::{TeardownError, delete_ram_policies};

use crate::color;

pub(crate) fn handle_delete_ram_policy_command(
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.delete_ram_policy_started");

    let file_config = load_hierarchy().map_err(report_failure)?;
    let config = resolve_teardown_config(overrides_from_matches(sub_matches), &file_config)
        .map_err(report_failure)?;
    let client = AlibabaRamClient::from_config(&config).map_err(report_failure)?;

    run_teardown(&client, &config)
}

fn overrides_from_matches(matches: &ArgMatches) -> TeardownOverrides {
    TeardownOverrides {
        name: matches.get_one::<String>("name").cloned(),
        credentials_requests_dir: matches.get_one::<PathBuf>("credentials-requests-dir").cloned(),
        user_name: matches.get_one::<String>("user-name").cloned(),
        region: matches.get_one::<String>("region").cloned(),
        access_key_id: matches.get_one::<String>("root-access-key").cloned(),
        access_key_secret: matches.get_one::<String>("root-access-key-secret").cloned(),
        ignore_missing: matches.get_flag("ignore-missing"),
        enable_tech_preview: matches.get_flag("enable-tech-preview"),
    }
}

fn run_teardown(
    client: &dyn RamClient,
    config: &TeardownConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match delete_ram_policies(client, config) {
        Ok(count) => {
            if count == 0 {
                println!(
                    "No CredentialsRequests found in {}.",
                    color::resource(&config.credentials_requests_dir().display().to_string())
                );
            } else {
                println!(
                    "{} {} RAM {} detached from user {} and deleted.",
                    color::done("Done."),
                    count,
                    if count == 1 { "policy" } else { "policies" },
                    color::resource(config.user_name())
                );
            }

            info!(
                event = "cli.delete_ram_policy_completed",
                user = config.user_name(),
                count = count
            );

            Ok(())
        }
        Err(e) => {
            if let TeardownError::DeleteFailed { policy, .. } = &e {
                eprintln!(
                    "{}",
                    color::hint(&format!(
                        "Policy {} is detached but still exists; re-run with --ignore-missing to finish.",
                        policy
                    ))
                );
            }
            Err(report_failure(e))
        }
    }
}

/// Print, log, and convert an error on its way out of the process.
fn report_failure<E>(e: E) -> Box<dyn std::error::Error>
where
    E: CredctlError,
{
    eprintln!("{}", color::error(&format!("delete-ram-policy failed: {}", e)));

    error!(
        event = "cli.delete_ram_policy_failed",
        error_code = e.error_code(),
        error = %e
    );

    events::log_app_error(&e);
    Box::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use credctl_config::CredctlConfig;
    use credctl_core::testing::{RamCall, RamOp, RecordingRamClient};
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &std::path::Path) -> TeardownConfig {
        let overrides = TeardownOverrides {
            name: Some("mycluster".to_string()),
            credentials_requests_dir: Some(dir.to_path_buf()),
            user_name: Some("ram-user-1".to_string()),
            access_key_id: Some("id".to_string()),
            access_key_secret: Some("secret".to_string()),
            ..Default::default()
        };
        resolve_teardown_config(overrides, &CredctlConfig::default()).unwrap()
    }

    fn write_ccm_manifest(dir: &std::path::Path) {
        fs::write(
            dir.join("ccm.yaml"),
            "kind: CredentialsRequest\nmetadata:\n  name: ccm\nspec:\n  secretRef:\n    name: kube-cloud-config\n",
        )
        .unwrap();
    }

    #[test]
    fn test_overrides_from_matches() {
        let matches = crate::app::build_cli()
            .try_get_matches_from([
                "credctl",
                "delete-ram-policy",
                "--name",
                "mycluster",
                "--credentials-requests-dir",
                "/tmp/credreqs",
                "--user-name",
                "ram-user-1",
                "--region",
                "cn-shanghai",
                "--root-access-key",
                "id",
                "--enable-tech-preview",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let overrides = overrides_from_matches(sub);
        assert_eq!(overrides.name.as_deref(), Some("mycluster"));
        assert_eq!(
            overrides.credentials_requests_dir,
            Some(PathBuf::from("/tmp/credreqs"))
        );
        assert_eq!(overrides.region.as_deref(), Some("cn-shanghai"));
        assert_eq!(overrides.access_key_id.as_deref(), Some("id"));
        assert!(overrides.access_key_secret.is_none());
        assert!(overrides.enable_tech_preview);
        assert!(!overrides.ignore_missing);
    }

    #[test]
    fn test_run_teardown_success() {
        let dir = TempDir::new().unwrap();
        write_ccm_manifest(dir.path());
        let client = RecordingRamClient::new();

        run_teardown(&client, &config_for(dir.path())).unwrap();

        assert_eq!(
            client.calls(),
            vec![
                RamCall::Detach {
                    policy: "mycluster-kube-cloud-config-policy".to_string(),
                    user: "ram-user-1".to_string(),
                },
                RamCall::Delete {
                    policy: "mycluster-kube-cloud-config-policy".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_run_teardown_empty_directory() {
        let dir = TempDir::new().unwrap();
        let client = RecordingRamClient::new();

        run_teardown(&client, &config_for(dir.path())).unwrap();
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_run_teardown_propagates_failure() {
        let dir = TempDir::new().unwrap();
        write_ccm_manifest(dir.path());
        let client = RecordingRamClient::new().failing(
            RamOp::Delete,
            "mycluster-kube-cloud-config-policy",
            "DeleteConflict.Policy.Version",
        );

        let err = run_teardown(&client, &config_for(dir.path())).unwrap_err();
        assert!(err.to_string().contains("mycluster-kube-cloud-config-policy"));
    }
}
