pub mod identity_service;
pub mod render_service;

pub use identity_service::{HeaderIdentityProvider, IdentityError, IdentityProvider};
pub use render_service::PageRenderer;
