use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::client::{DRIVE_SCOPE, SHEETS_SCOPE};
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, instrument};
use yup_oauth2::{
    ServiceAccountAuthenticator, authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

pub(super) type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create a service account authenticator and verify it by fetching a token
#[instrument(name = "Authenticating service account", skip_all, fields(key = ?config.service_account_key))]
pub(super) async fn create_and_verify_authenticator(config: &GoogleConfig) -> Result<AuthType> {
    let key = yup_oauth2::read_service_account_key(&config.service_account_key)
        .await
        .map_err(|e| {
            AppError::Auth(format!(
                "Failed to read service account key {:?}: {}",
                config.service_account_key, e
            ))
        })?;
    let client_email = key.client_email.clone();

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    // Trigger authentication by requesting a token
    let _token = auth
        .token(&[SHEETS_SCOPE.as_ref(), DRIVE_SCOPE.as_ref()])
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;
    debug!(client_email = %client_email, "Service account authenticated");

    Ok(auth)
}
