//! Authentication and authorization
//!
//! Bearer tokens are verified into an [`Identity`]; imports are limited to
//! the roles listed in `auth.import_roles`.

pub mod identity;
pub mod jwt;


pub use identity::{Identity, Role};
pub use jwt::JwtHandler;

use crate::config::AuthConfig;
use crate::utils::error::{Result, SuppliesError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    jwt: Arc<JwtHandler>,
    import_roles: Vec<Role>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig) -> Result<Self> {
        info!("Initializing authentication system");

        let import_roles = config
            .import_roles
            .iter()
            .map(|role| role.parse::<Role>().map_err(SuppliesError::config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            jwt: Arc::new(JwtHandler::new(config)),
            import_roles,
        })
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Verify a bearer token and resolve the caller
    pub fn authenticate(&self, token: &str) -> Result<Identity> {
        let claims = self.jwt.verify_token(token)?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| SuppliesError::auth(format!("Invalid token role: {}", e)))?;

        debug!("Authenticated user {} as {}", claims.sub, role);
        Ok(Identity::new(claims.sub, role))
    }

    /// Check that `identity` may run imports
    pub fn authorize_import(&self, identity: &Identity) -> Result<()> {
        if self.import_roles.contains(&identity.role) {
            return Ok(());
        }

        warn!(
            "User {} with role {} denied import access",
            identity.user_id, identity.role
        );
        Err(SuppliesError::authorization(format!(
            "User role {} is not authorized to access this route",
            identity.role
        )))
    }
}
