use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{debug, error, info};

use crate::{
  Service,
  aws::{self, roles::CREDENTIAL_REQUESTS},
  clients::{AwsClients, OcmClients},
  ocm::{AddOn, CreateManagedServiceArgs, ManagedService},
  service::operator_roles,
  version,
};

/// Parse the trailing add-on parameter flags into a map of flag name to value
///
/// Accepts `--<name>=<value>`, `--<name> <value>` and a bare `--<name>` which is
/// treated as `true`
pub fn parse_parameter_flags(args: &[String]) -> Result<BTreeMap<String, String>> {
  let mut flags = BTreeMap::new();
  let mut iter = args.iter().peekable();

  while let Some(arg) = iter.next() {
    let Some(flag) = arg.strip_prefix("--") else {
      bail!("Unexpected argument '{arg}', add-on parameters must be passed as --<name>=<value>");
    };

    let (name, value) = match flag.split_once('=') {
      Some((name, value)) => (name.to_string(), value.to_string()),
      None => match iter.next_if(|next| !next.starts_with("--")) {
        Some(value) => (flag.to_string(), value.to_string()),
        None => (flag.to_string(), "true".to_string()),
      },
    };

    if name.is_empty() {
      bail!("Invalid add-on parameter flag '{arg}'");
    }
    flags.insert(name, value);
  }

  Ok(flags)
}

/// Copy the value of every flag whose name matches a parameter ID of the add-on
///
/// Flags without a matching parameter are ignored and parameters without a
/// matching flag are left unset
pub fn map_parameters(addon: Option<&AddOn>, flags: &BTreeMap<String, String>) -> BTreeMap<String, String> {
  let Some(addon) = addon else {
    return BTreeMap::new();
  };

  addon
    .parameters()
    .iter()
    .filter_map(|param| flags.get(&param.id).map(|value| (param.id.clone(), value.clone())))
    .collect()
}

/// Commands that still have to be run for the cluster to finish installing
pub fn next_steps(cluster_name: &str) -> Vec<String> {
  vec![
    format!("rosa create operator-roles --cluster {cluster_name}"),
    format!("rosa create oidc-provider --cluster {cluster_name}"),
  ]
}

/// Create a managed service
///
/// Resolves the account and operator roles, the account and region of the caller,
/// and the add-on parameters before sending a single create request
pub async fn create_service<A, O>(aws: &A, ocm: &O, args: &Service) -> Result<ManagedService>
where
  A: AwsClients,
  O: OcmClients,
{
  let mut flags = parse_parameter_flags(&args.parameters)?;
  flags.entry("service".to_string()).or_insert_with(|| args.service.clone());
  flags
    .entry("clusterName".to_string())
    .or_insert_with(|| args.cluster_name.clone());

  let version = version::minor(&args.openshift_version)?;

  let account_roles = aws::resolve_account_roles(aws, &version).await?;

  let creator = aws.get_creator().await.context("Unable to get IAM credentials")?;
  let prefix = match &args.operator_roles_prefix {
    Some(prefix) => prefix.to_string(),
    None => operator_roles::operator_roles_prefix(&args.cluster_name),
  };
  debug!("Using '{prefix}' as the operator roles prefix");

  let operator_roles =
    operator_roles::plan_operator_roles(&CREDENTIAL_REQUESTS, &prefix, &version, &creator.account_id)?;
  operator_roles::validate_operator_roles(aws, &operator_roles).await?;

  let region = aws.region().context("Error getting region")?;
  info!("Using AWS region: {region}");

  let addon = match ocm.get_addon(&args.service).await {
    Ok(addon) => Some(addon),
    Err(err) => {
      error!("Failed to process service parameters: {err:#}");
      None
    }
  };

  let request = CreateManagedServiceArgs {
    service_name: args.service.clone(),
    cluster_name: args.cluster_name.clone(),
    aws_role_arn: account_roles.installer,
    aws_support_role_arn: account_roles.support,
    aws_control_plane_role_arn: account_roles.control_plane,
    aws_worker_role_arn: account_roles.worker,
    aws_account_id: creator.account_id,
    aws_region: region,
    aws_operator_iam_role_list: operator_roles,
    parameters: map_parameters(addon.as_ref(), &flags),
  };

  ocm
    .create_managed_service(&request)
    .await
    .context("Failed to create managed service")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ocm::resources::{AddOnParameter, AddOnParameterList};

  fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  fn addon(ids: &[&str]) -> AddOn {
    AddOn {
      id: "svc".to_string(),
      name: "Service".to_string(),
      parameters: Some(AddOnParameterList {
        items: ids
          .iter()
          .map(|id| AddOnParameter {
            id: id.to_string(),
            ..Default::default()
          })
          .collect(),
      }),
    }
  }

  #[test]
  fn parse_flags_with_equals() {
    let flags = parse_parameter_flags(&args(&["--cidr-range=10.1.0.0/26", "--email=a=b"])).unwrap();
    assert_eq!(flags["cidr-range"], "10.1.0.0/26");
    assert_eq!(flags["email"], "a=b");
  }

  #[test]
  fn parse_flags_with_separate_value() {
    let flags = parse_parameter_flags(&args(&["--cidr-range", "10.1.0.0/26", "--enabled"])).unwrap();
    assert_eq!(flags["cidr-range"], "10.1.0.0/26");
    assert_eq!(flags["enabled"], "true");
  }

  #[test]
  fn parse_flags_rejects_positional() {
    let result = parse_parameter_flags(&args(&["value"]));
    assert!(result.is_err());
  }

  #[test]
  fn parse_flags_rejects_empty_name() {
    assert!(parse_parameter_flags(&args(&["--=value"])).is_err());
  }

  #[test]
  fn parse_no_flags() {
    assert!(parse_parameter_flags(&[]).unwrap().is_empty());
  }

  #[test]
  fn map_only_matching_parameters() {
    let flags = BTreeMap::from([
      ("cidr-range".to_string(), "10.1.0.0/26".to_string()),
      ("unknown".to_string(), "ignored".to_string()),
    ]);
    let parameters = map_parameters(Some(&addon(&["cidr-range", "notification-email"])), &flags);

    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters["cidr-range"], "10.1.0.0/26");
  }

  #[test]
  fn map_without_addon_is_empty() {
    let flags = BTreeMap::from([("cidr-range".to_string(), "10.1.0.0/26".to_string())]);
    assert!(map_parameters(None, &flags).is_empty());
  }

  #[test]
  fn next_steps_reference_cluster() {
    let steps = next_steps("c1");
    assert_eq!(steps[0], "rosa create operator-roles --cluster c1");
    assert_eq!(steps[1], "rosa create oidc-provider --cluster c1");
  }
}
