//! Sign-in state shared by every view.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::UserRepository;
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};

/// Profile returned by a social sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialUser {
    pub provider: String,
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Sent to the GrowPod server as the `token` query parameter.
    pub id_token: String,
}

/// An identity provider able to sign a user in interactively.
#[async_trait]
pub trait SignInProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run the interactive sign-in and return the signed-in profile.
    async fn sign_in(&self) -> GrowPodResult<SocialUser>;

    /// A previous sign-in that is still valid, if the provider persisted one.
    async fn restore(&self) -> GrowPodResult<Option<SocialUser>>;

    /// Forget the sign-in, including anything persisted.
    async fn sign_out(&self, user: &SocialUser) -> GrowPodResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    SignedOut,
    SignedIn(SocialUser),
}

/// Signed-in state plus the collaborators that follow it: the user cache and
/// the token attached to REST requests.
pub struct OAuthSession {
    provider: Arc<dyn SignInProvider>,
    users: UserRepository,
    client: GrowPodClient,
    state: SessionState,
}

impl OAuthSession {
    pub fn new(provider: Arc<dyn SignInProvider>, users: UserRepository, client: GrowPodClient) -> Self {
        OAuthSession {
            provider,
            users,
            client,
            state: SessionState::SignedOut,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn(_))
    }

    pub fn user_data(&self) -> Option<&SocialUser> {
        match &self.state {
            SessionState::SignedIn(user) => Some(user),
            SessionState::SignedOut => None,
        }
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Pick up a sign-in persisted by an earlier run without prompting.
    pub async fn resume(&mut self) -> GrowPodResult<bool> {
        if self.is_signed_in() {
            return Ok(true);
        }

        match self.provider.restore().await? {
            Some(user) => {
                self.enter_signed_in(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Signed-out -> signed-in, through the provider's interactive flow.
    pub async fn sign_in(&mut self) -> GrowPodResult<&SocialUser> {
        if let SessionState::SignedIn(user) = &self.state {
            return Err(GrowPodError::Auth(format!(
                "Already signed in as {}",
                user.email
            )));
        }

        let user = self.provider.sign_in().await?;
        info!(provider = self.provider.name(), email = %user.email, "Signed in");

        if let Err(e) = self.users.add(&user) {
            warn!("Could not update user cache: {e}");
        }

        self.enter_signed_in(user);
        self.user_data()
            .ok_or_else(|| GrowPodError::Auth("Sign-in did not complete".into()))
    }

    /// Signed-in -> signed-out. Does nothing when already signed out.
    pub async fn sign_out(&mut self) -> GrowPodResult<()> {
        let SessionState::SignedIn(user) = &self.state else {
            return Ok(());
        };

        self.provider.sign_out(user).await?;
        info!(provider = self.provider.name(), "Signed out");

        self.client.set_token(None);
        self.state = SessionState::SignedOut;
        Ok(())
    }

    fn enter_signed_in(&mut self, user: SocialUser) {
        self.client.set_token(Some(user.id_token.clone()));
        self.state = SessionState::SignedIn(user);
    }
}
