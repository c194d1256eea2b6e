//! Credential fetcher port.

use async_trait::async_trait;

use crate::domain::errors::FetchError;
use crate::domain::models::{CredentialBundle, SessionEndpoint};

/// Port for obtaining session-scoped cloud credentials.
///
/// Implementations perform exactly one attempt per call and absorb every
/// lower-level failure into a [`FetchError`]; they never panic and never
/// return a partially populated bundle.
#[async_trait]
pub trait CredentialFetcher: Send + Sync {
    /// Fetch the credential bundle for `endpoint`'s session.
    async fn fetch(&self, endpoint: &SessionEndpoint) -> Result<CredentialBundle, FetchError>;
}
