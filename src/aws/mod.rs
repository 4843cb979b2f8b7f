pub mod arn;
pub mod resources;
pub mod roles;

pub use resources::Creator;
pub use roles::{AccountRoleArns, resolve_account_roles};
