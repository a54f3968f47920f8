//! Principal (store-backed user) domain entities.

pub mod login;
pub mod model;

pub use login::{next_login, seed_login};
pub use model::{NewPrincipal, Principal, PrincipalProfile, PrincipalUpdate, ProfileField};
