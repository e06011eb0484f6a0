mod registry;
mod user;

pub use registry::Registry;
pub use user::{Role, User};
