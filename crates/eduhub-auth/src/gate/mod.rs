//! Role-based authorization.
//!
//! Every protected operation declares the set of roles allowed to call it
//! and funnels through [`AuthenticatedPrincipal::authorize`].

pub mod authorizer;
pub mod principal;

pub use authorizer::AuthorizationGate;
pub use principal::AuthenticatedPrincipal;
