use std::cmp::Ordering;

use anyhow::{Context, Result, bail};

/// OpenShift version used when none is provided on the command line
pub const DEFAULT: &str = "4.9";

/// Given an OpenShift version, return its `major.minor` portion
///
/// For example, `openshift-v4.10.3` and `4.10.3-rc.1` both return `4.10`
pub fn minor(version: &str) -> Result<String> {
  let (major, minor) = parse_major_minor(version)?;

  Ok(format!("{major}.{minor}"))
}

/// Returns true when the cluster version is at or above the minimum version required
///
/// Both versions are compared numerically by their `major.minor[.patch]` parts; a
/// missing patch is treated as `0`
pub fn is_supported(cluster_version: &str, min_version: &str) -> Result<bool> {
  let cluster = parse(cluster_version)
    .with_context(|| format!("Invalid cluster version '{cluster_version}'"))?;
  let minimum = parse(min_version).with_context(|| format!("Invalid minimum version '{min_version}'"))?;

  Ok(cluster.cmp(&minimum) != Ordering::Less)
}

/// Parse the `major.minor` parts of a version, ignoring any `openshift-v`/`v` prefix
fn parse_major_minor(version: &str) -> Result<(u32, u32)> {
  let (major, minor, _) = parse(version)?;

  Ok((major, minor))
}

fn parse(version: &str) -> Result<(u32, u32, u32)> {
  let raw = version.trim();
  let raw = raw.strip_prefix("openshift-v").unwrap_or(raw);
  let raw = raw.strip_prefix('v').unwrap_or(raw);

  // Pre-release or build metadata does not take part in the comparison
  let core = raw.split(['-', '+']).next().unwrap_or_default();
  let parts: Vec<&str> = core.split('.').collect();

  if parts.len() < 2 || parts.len() > 3 {
    bail!("Invalid version format '{version}', expected 'X.Y[.Z]'");
  }

  let major = parts[0]
    .parse::<u32>()
    .with_context(|| format!("Invalid major version in '{version}'"))?;
  let minor = parts[1]
    .parse::<u32>()
    .with_context(|| format!("Invalid minor version in '{version}'"))?;
  let patch = match parts.get(2) {
    Some(patch) => patch
      .parse::<u32>()
      .with_context(|| format!("Invalid patch version in '{version}'"))?,
    None => 0,
  };

  Ok((major, minor, patch))
}
