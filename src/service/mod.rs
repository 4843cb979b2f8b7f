pub mod create;
pub mod list;
pub mod operator_roles;

pub use create::{create_service, next_steps};
pub use list::list_services;
