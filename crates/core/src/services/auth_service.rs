use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::errors::CoreError;
use crate::models::session::Session;

/// Sign-in collaborator. The presentation layer depends only on this trait,
/// so the simulated implementation can be swapped for a real backend.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session, CoreError>;
}

/// Stand-in authenticator: waits a fixed delay, then accepts any
/// non-blank credentials. There is no backend and no password check.
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn login(&self, username: &str, password: &str) -> Result<Session, CoreError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CoreError::Authentication(
                "username and password are required".into(),
            ));
        }

        tokio::time::sleep(self.delay).await;
        info!(username, "signed in (simulated)");

        Ok(Session {
            username: username.to_string(),
            signed_in_at: chrono::Utc::now(),
        })
    }
}
