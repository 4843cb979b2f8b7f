use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{aws::arn::Arn, clients::AwsClients};

/// Prefix used by `rosa create account-roles` when no custom prefix is given
pub const DEFAULT_PREFIX: &str = "ManagedOpenShift";

/// Tag applied to account roles that identifies the role type
pub const TAG_ROLE_TYPE: &str = "rosa_role_type";

/// Tag applied to account roles that records the OpenShift version of the attached policies
pub const TAG_OPENSHIFT_VERSION: &str = "rosa_openshift_version";

pub const INSTALLER_ROLE_TYPE: &str = "installer";
pub const SUPPORT_ROLE_TYPE: &str = "support";
pub const CONTROL_PLANE_ROLE_TYPE: &str = "instance_controlplane";
pub const WORKER_ROLE_TYPE: &str = "instance_worker";

/// A long-lived IAM role created ahead of provisioning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRole {
  /// Value of the `rosa_role_type` tag
  pub role_type: &'static str,
  /// Canonical name embedded in the role name, `<prefix>-<name>-Role`
  pub name: &'static str,
  /// Minimum OpenShift version the role category applies to
  pub min_version: Option<&'static str>,
}

impl AccountRole {
  /// Role name of this category for the given prefix, `<prefix>-<Name>-Role`
  pub fn name_with_prefix(&self, prefix: &str) -> String {
    format!("{prefix}-{}-Role", self.name)
  }
}

/// All account roles, installer first since it anchors the prefix of the others
pub const ACCOUNT_ROLES: [AccountRole; 4] = [
  AccountRole {
    role_type: INSTALLER_ROLE_TYPE,
    name: "Installer",
    min_version: None,
  },
  AccountRole {
    role_type: SUPPORT_ROLE_TYPE,
    name: "Support",
    min_version: None,
  },
  AccountRole {
    role_type: CONTROL_PLANE_ROLE_TYPE,
    name: "ControlPlane",
    min_version: None,
  },
  AccountRole {
    role_type: WORKER_ROLE_TYPE,
    name: "Worker",
    min_version: None,
  },
];

/// Look up an account role definition by its role type tag value
pub fn account_role(role_type: &str) -> Option<&'static AccountRole> {
  ACCOUNT_ROLES.iter().find(|role| role.role_type == role_type)
}

/// An in-cluster component that requires its own IAM role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operator {
  pub name: &'static str,
  pub namespace: &'static str,
  /// Minimum OpenShift version the operator is deployed on
  pub min_version: Option<&'static str>,
}

/// Operator credentials requested by every cluster
pub const CREDENTIAL_REQUESTS: [Operator; 6] = [
  Operator {
    name: "aws-cloud-credentials",
    namespace: "openshift-machine-api",
    min_version: None,
  },
  Operator {
    name: "cloud-credential-operator-iam-ro-creds",
    namespace: "openshift-cloud-credential-operator",
    min_version: None,
  },
  Operator {
    name: "installer-cloud-credentials",
    namespace: "openshift-image-registry",
    min_version: None,
  },
  Operator {
    name: "cloud-credentials",
    namespace: "openshift-ingress-operator",
    min_version: None,
  },
  Operator {
    name: "ebs-cloud-credentials",
    namespace: "openshift-cluster-csi-drivers",
    min_version: None,
  },
  Operator {
    name: "cloud-credentials",
    namespace: "openshift-cloud-network-config-controller",
    min_version: Some("4.10"),
  },
];

/// The resolved ARNs of all four account roles
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRoleArns {
  pub installer: String,
  pub support: String,
  pub control_plane: String,
  pub worker: String,
}

/// Pick the installer role ARN out of the roles found
///
/// A single match is used as-is. With several matches, the one created with the
/// default prefix is preferred, falling back to the first one listed
pub fn select_installer_role(arns: &[String]) -> Option<&str> {
  let role = &ACCOUNT_ROLES[0];

  match arns {
    [] => None,
    [only] => {
      info!("Using {only} for the {} role", role.name);
      Some(only)
    }
    _ => {
      let default_name = role.name_with_prefix(DEFAULT_PREFIX);
      let selected = arns
        .iter()
        .rev()
        .find(|arn| arn.contains(&default_name))
        .unwrap_or(&arns[0]);
      warn!("More than one {} role found, going with {selected}", role.name);
      Some(selected)
    }
  }
}

/// Derive the account role prefix from a role ARN by stripping the `-<Name>-Role` suffix
pub fn role_prefix(role_arn: &str, role: &AccountRole) -> Result<String> {
  let arn: Arn = role_arn.parse()?;
  let role_name = arn.role_name()?;
  let suffix = format!("-{}-Role", role.name);

  Ok(role_name.strip_suffix(&suffix).unwrap_or(role_name).to_string())
}

/// Find the installer, support, control plane, and worker roles for the given OpenShift version
///
/// The installer role is found first and its prefix is used to match the remaining
/// three roles. All roles that cannot be found are reported before failing
pub async fn resolve_account_roles<A: AwsClients>(aws: &A, version: &str) -> Result<AccountRoleArns> {
  let installer = &ACCOUNT_ROLES[0];

  let arns = aws
    .find_role_arns(installer.role_type, version)
    .await
    .with_context(|| format!("Failed to find {} role", installer.name))?;

  let installer_arn = match select_installer_role(&arns) {
    Some(arn) => arn.to_string(),
    None => bail!("No account roles found. You will need to run 'rosa create account-roles' to create them first."),
  };

  let prefix = role_prefix(&installer_arn, installer)
    .with_context(|| format!("Failed to find prefix from {} account role", installer.name))?;
  debug!("Using '{prefix}' as the role prefix");

  let mut resolved = AccountRoleArns {
    installer: installer_arn,
    ..Default::default()
  };
  let mut missing = Vec::new();

  for role in ACCOUNT_ROLES.iter().skip(1) {
    let arns = aws
      .find_role_arns(role.role_type, version)
      .await
      .with_context(|| format!("Failed to find {} role", role.name))?;

    let expected = role.name_with_prefix(&prefix);
    let selected = match arns.iter().rev().find(|arn| arn.contains(&expected)) {
      Some(arn) => arn.to_string(),
      None => {
        error!(
          "No {} account roles found. You will need to run 'rosa create account-roles' to create them first.",
          role.name
        );
        missing.push(role.name);
        continue;
      }
    };
    info!("Using {selected} for the {} role", role.name);

    match role.role_type {
      SUPPORT_ROLE_TYPE => resolved.support = selected,
      CONTROL_PLANE_ROLE_TYPE => resolved.control_plane = selected,
      WORKER_ROLE_TYPE => resolved.worker = selected,
      _ => {}
    }
  }

  if !missing.is_empty() {
    bail!("Please create the above roles to continue ({} missing)", missing.join(", "));
  }

  Ok(resolved)
}
