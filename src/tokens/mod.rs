pub mod codec;

pub use codec::{issue, secrets_match, verify, verify_at, Claims};

pub const ADMIN_ROLE: &str = "admin";
