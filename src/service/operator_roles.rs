use anyhow::{Context, Result, bail};
use rand::{Rng, distributions::Alphanumeric};

use crate::{aws::roles::Operator, clients::AwsClients, ocm::OperatorIamRole, version};

/// IAM limits role names to 64 characters
pub const MAX_ROLE_NAME_LENGTH: usize = 64;

/// Generate a random, lowercase alphanumeric label of the given length
pub fn random_label(len: usize) -> String {
  rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(len)
    .map(char::from)
    .collect::<String>()
    .to_lowercase()
}

/// Prefix shared by the operator roles of a cluster, `<cluster-name>-<label>`
pub fn operator_roles_prefix(cluster_name: &str) -> String {
  format!("{cluster_name}-{}", random_label(4))
}

/// ARN of the role an operator will assume, `arn:aws:iam::<account>:role/<prefix>-<namespace>-<name>`
///
/// The role name is truncated to the maximum length IAM allows
pub fn operator_role_arn(prefix: &str, operator: &Operator, account_id: &str) -> String {
  let role: String = format!("{prefix}-{}-{}", operator.namespace, operator.name)
    .chars()
    .take(MAX_ROLE_NAME_LENGTH)
    .collect();

  format!("arn:aws:iam::{account_id}:role/{role}")
}

/// Compute the operator roles required for the given OpenShift version
///
/// Operators that are not deployed on the version are left out
pub fn plan_operator_roles(
  operators: &[Operator],
  prefix: &str,
  openshift_version: &str,
  account_id: &str,
) -> Result<Vec<OperatorIamRole>> {
  let minor = version::minor(openshift_version)?;
  let mut roles = Vec::new();

  for operator in operators {
    if let Some(min_version) = operator.min_version {
      let supported = version::is_supported(&minor, min_version)
        .with_context(|| format!("Error validating operator role '{}' version", operator.name))?;
      if !supported {
        continue;
      }
    }

    roles.push(OperatorIamRole {
      name: operator.name.to_string(),
      namespace: operator.namespace.to_string(),
      role_arn: operator_role_arn(prefix, operator, account_id),
    });
  }

  Ok(roles)
}

/// Ensure none of the operator roles exist in the account yet
pub async fn validate_operator_roles<A: AwsClients>(aws: &A, roles: &[OperatorIamRole]) -> Result<()> {
  for role in roles {
    let Some((_, name)) = role.role_arn.split_once('/') else {
      bail!("Invalid operator role ARN '{}'", role.role_arn);
    };

    aws
      .validate_role_name_available(name)
      .await
      .context("Error validating role")?;
  }

  Ok(())
}
