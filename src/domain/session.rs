//! Read-only view of the external identity session.
//!
//! The dashboard never authenticates anyone itself; it only needs a display
//! name for the header greeting.

use serde::Deserialize;

/// Fallback shown when the identity provider has no name on record.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";

/// Anything able to report the signed-in user's display name.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait SessionIdentity {
    fn display_name(&self) -> Option<String>;
}

/// Session payload shape published by the identity provider.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

/// Free-form metadata captured at sign-up.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub nombre: Option<String>,
}

impl SessionIdentity for SessionUser {
    fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|meta| meta.nombre.clone())
    }
}

/// Header greeting for the signed-in user.
pub fn greeting<I>(identity: &I) -> String
where
    I: SessionIdentity + ?Sized,
{
    let name = identity
        .display_name()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
    format!("Bienvenido, {name}")
}
