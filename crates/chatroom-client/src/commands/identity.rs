use chatroom_shared::Identity;

use super::logged;
use crate::client::ChatClient;
use crate::error::Result;
use crate::session::IdentityProvider;

impl<P: IdentityProvider> ChatClient<P> {
    pub async fn sign_in(&mut self) -> Result<Identity> {
        let result = self.provider.sign_in().await.map_err(Into::into);
        let identity = logged("sign-in", result)?;
        self.sync_session();
        Ok(identity)
    }

    pub async fn sign_out(&mut self) -> Result<()> {
        let result = self.provider.sign_out().await.map_err(Into::into);
        logged("sign-out", result)?;
        self.sync_session();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{ada, test_client};
    use crate::error::{AuthError, ClientError};
    use crate::session::AuthState;

    #[tokio::test]
    async fn test_sign_in_applies_immediately() {
        let (mut client, _dir) = test_client(Some(ada())).await;
        let identity = client.sign_in().await.unwrap();

        assert_eq!(identity.uid.as_str(), "ada");
        assert_eq!(*client.auth_state(), AuthState::SignedIn(ada()));
    }

    #[tokio::test]
    async fn test_sign_in_failure_leaves_state() {
        let (mut client, _dir) = test_client(None).await;
        assert!(matches!(
            client.sign_in().await,
            Err(ClientError::Auth(AuthError::NoProfile))
        ));
        assert!(client.identity().is_none());
    }
}
