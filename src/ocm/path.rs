use std::fmt;

/// Path of a resource exposed by the OpenShift Cluster Manager API
///
/// Every resource lives under its parent, so building the path to a resource is a
/// matter of joining segments onto the path of its parent, e.g.
/// `/api/clusters_mgmt/v1` + `addons` + `<id>`. Joining follows the usual path
/// cleaning rules: repeated separators collapse, `.` is dropped and `..` removes
/// the previous segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath {
  segments: Vec<String>,
}

impl ResourcePath {
  /// The API root, `/`
  pub fn root() -> Self {
    Self { segments: Vec::new() }
  }

  /// Root of the cluster management service, `/api/clusters_mgmt/v1`
  pub fn clusters_mgmt() -> Self {
    Self::root().join("api").join("clusters_mgmt").join("v1")
  }

  /// Root of the service management service, `/api/service_mgmt/v1`
  pub fn service_mgmt() -> Self {
    Self::root().join("api").join("service_mgmt").join("v1")
  }

  /// Collection of add-ons, `/api/clusters_mgmt/v1/addons`
  pub fn addons() -> Self {
    Self::clusters_mgmt().join("addons")
  }

  /// A single add-on, `/api/clusters_mgmt/v1/addons/<id>`
  pub fn addon(id: &str) -> Self {
    Self::addons().join(id)
  }

  /// Collection of managed services, `/api/service_mgmt/v1/services`
  pub fn services() -> Self {
    Self::service_mgmt().join("services")
  }

  /// Returns the path of the child resource `segment`
  ///
  /// The segment may itself contain separators, in which case each part is joined in turn
  pub fn join(&self, segment: &str) -> Self {
    let mut segments = self.segments.clone();

    for part in segment.split('/') {
      match part {
        "" | "." => {}
        ".." => {
          segments.pop();
        }
        part => segments.push(part.to_string()),
      }
    }

    Self { segments }
  }
}

impl fmt::Display for ResourcePath {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "/{}", self.segments.join("/"))
  }
}
