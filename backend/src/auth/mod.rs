//! Authentication and authorization
//!
//! Request flow: the decode middleware ([`authenticate`]) attaches an
//! [`Identity`] to the request when a valid token names a still-existing
//! user; the guard family ([`guards`]) gates routes on that identity.

mod guards;
mod identity;
mod jwt;
mod middleware;
mod password;

pub use guards::{
    forbid_admin, forbid_role, require_admin, require_anonymous, require_authenticated,
    require_role, AUTHENTICATION_FAILED, PERMISSION_DENIED,
};
pub use identity::{Identity, MaybeIdentity};
pub use jwt::{Claims, JwtService};
pub use middleware::authenticate;
pub use password::PasswordService;
