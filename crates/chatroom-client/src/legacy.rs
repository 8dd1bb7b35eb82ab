//! Legacy credential login against ChatEngine.
//!
//! The check is a single authenticated `GET /chats`; any success status
//! means the credentials are valid, and they are kept in local storage.

use std::time::Duration;

use tracing::{info, warn};

use chatroom_shared::constants::{
    CHAT_ENGINE_CHATS_URL, KEY_LEGACY_PASSWORD, KEY_LEGACY_USERNAME, LEGACY_LOGIN_ERROR,
};

use crate::error::LegacyLoginError;
use crate::local_storage::LocalStorage;

const REQUEST_TIMEOUT_SECS: u64 = 15;

pub struct LegacyLogin {
    http: reqwest::Client,
    project_id: String,
    endpoint: String,
}

impl LegacyLogin {
    pub fn new(project_id: Option<&str>) -> Result<Self, LegacyLoginError> {
        let project_id = project_id
            .filter(|p| !p.is_empty())
            .ok_or(LegacyLoginError::NoProject)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            project_id: project_id.to_string(),
            endpoint: CHAT_ENGINE_CHATS_URL.to_string(),
        })
    }

    pub fn build_request(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Request, LegacyLoginError> {
        Ok(self
            .http
            .get(&self.endpoint)
            .header("Project-ID", &self.project_id)
            .header("User-Name", username)
            .header("User-Secret", password)
            .build()?)
    }

    pub async fn check(&self, username: &str, password: &str) -> Result<(), LegacyLoginError> {
        let request = self.build_request(username, password)?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LegacyLoginError::Rejected(status.as_u16()));
        }
        Ok(())
    }

    /// Check the credentials and remember them. On failure returns the
    /// inline text to show under the form.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        storage: &mut LocalStorage,
    ) -> Result<(), &'static str> {
        if let Err(e) = self.check(username, password).await {
            warn!(error = %e, "Legacy login failed");
            return Err(LEGACY_LOGIN_ERROR);
        }
        remember(storage, username, password);
        info!(user = username, "Legacy login succeeded");
        Ok(())
    }
}

fn remember(storage: &mut LocalStorage, username: &str, password: &str) {
    let saved = storage
        .set(KEY_LEGACY_USERNAME, username)
        .and_then(|()| storage.set(KEY_LEGACY_PASSWORD, password));
    if let Err(e) = saved {
        warn!(error = %e, "Could not persist legacy credentials");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_project() {
        assert!(matches!(LegacyLogin::new(None), Err(LegacyLoginError::NoProject)));
        assert!(matches!(LegacyLogin::new(Some("")), Err(LegacyLoginError::NoProject)));
    }

    #[test]
    fn test_request_headers() {
        let login = LegacyLogin::new(Some("proj-1")).unwrap();
        let request = login.build_request("ada", "s3cret").unwrap();

        assert_eq!(request.url().as_str(), CHAT_ENGINE_CHATS_URL);
        let headers = request.headers();
        assert_eq!(headers["Project-ID"], "proj-1");
        assert_eq!(headers["User-Name"], "ada");
        assert_eq!(headers["User-Secret"], "s3cret");
    }

    #[test]
    fn test_remember_stores_both_keys() {
        let mut storage = LocalStorage::in_memory();
        remember(&mut storage, "ada", "pw");
        assert_eq!(storage.get(KEY_LEGACY_USERNAME), Some("ada"));
        assert_eq!(storage.get(KEY_LEGACY_PASSWORD), Some("pw"));
    }
}
