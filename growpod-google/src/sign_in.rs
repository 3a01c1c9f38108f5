//! "Sign in with Google" for the GrowPod server.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use growpod_core::config::GoogleClientConfig;
use growpod_core::session::{SignInProvider, SocialUser};
use growpod_core::GrowPodResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::oauth::{self, SIGN_IN_SCOPES, UserInfo};
use crate::token_store::{TokenStore, Tokens};
use crate::{auth_error, base_dir};

const PROVIDER: &str = "GOOGLE";

/// What a sign-in leaves on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSignIn {
    user: SocialUser,
    tokens: Tokens,
}

pub struct GoogleSignIn {
    creds: GoogleClientConfig,
    store: TokenStore,
    http: reqwest::Client,
}

impl GoogleSignIn {
    pub fn new(creds: GoogleClientConfig) -> GrowPodResult<Self> {
        let store = TokenStore::new(base_dir()?.join("sign_in.toml"));
        Ok(Self::with_store(creds, store))
    }

    pub fn with_store(creds: GoogleClientConfig, store: TokenStore) -> Self {
        GoogleSignIn {
            creds,
            store,
            http: reqwest::Client::new(),
        }
    }

    async fn authenticate(&self) -> Result<SocialUser> {
        let state = uuid::Uuid::new_v4().to_string();
        let url = oauth::consent_url(&self.creds, SIGN_IN_SCOPES, &state)?;

        oauth::open_in_browser(url.as_str());
        let callback = oauth::wait_for_callback(self.creds.redirect_port).await?;

        if callback.state != state {
            bail!("OAuth state mismatch, ignoring callback");
        }

        eprintln!("\nReceived authorization code, exchanging for tokens...");
        let response = oauth::exchange_code(&self.http, &self.creds, &callback.code).await?;

        let id_token = response
            .id_token
            .context("Google did not return an ID token")?;
        let info = oauth::fetch_userinfo(&self.http, &response.access_token).await?;
        let user = social_user(info, id_token);

        let stored = StoredSignIn {
            user: user.clone(),
            tokens: Tokens::new(
                response.access_token,
                response.refresh_token,
                response.expires_in,
            ),
        };
        self.store.save(&stored)?;

        Ok(user)
    }

    fn restore_stored(&self) -> Result<Option<SocialUser>> {
        let Some(stored) = self.store.load::<StoredSignIn>()? else {
            return Ok(None);
        };

        // The ID token lives as long as the access token it came with.
        if stored.tokens.is_expired() {
            debug!("Stored Google sign-in has expired");
            return Ok(None);
        }

        Ok(Some(stored.user))
    }

    async fn forget(&self) -> Result<()> {
        if let Some(stored) = self.store.load::<StoredSignIn>()? {
            oauth::revoke(&self.http, &stored.tokens.access_token).await;
        }
        self.store.delete()
    }
}

fn social_user(info: UserInfo, id_token: String) -> SocialUser {
    SocialUser {
        provider: PROVIDER.to_string(),
        id: info.sub,
        email: info.email,
        name: info.name,
        photo_url: info.picture,
        first_name: info.given_name,
        last_name: info.family_name,
        id_token,
    }
}

#[async_trait]
impl SignInProvider for GoogleSignIn {
    fn name(&self) -> &str {
        "google"
    }

    async fn sign_in(&self) -> GrowPodResult<SocialUser> {
        let user = self.authenticate().await.map_err(auth_error)?;
        info!(email = %user.email, "Google sign-in complete");
        Ok(user)
    }

    async fn restore(&self) -> GrowPodResult<Option<SocialUser>> {
        self.restore_stored().map_err(auth_error)
    }

    async fn sign_out(&self, _user: &SocialUser) -> GrowPodResult<()> {
        self.forget().await.map_err(auth_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> GoogleClientConfig {
        GoogleClientConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            redirect_port: 8085,
        }
    }

    fn info() -> UserInfo {
        UserInfo {
            sub: "1087".into(),
            email: "ana@example.com".into(),
            name: "Ana Lima".into(),
            picture: "https://example.com/ana.png".into(),
            given_name: "Ana".into(),
            family_name: "Lima".into(),
        }
    }

    #[test]
    fn maps_userinfo_to_social_user() {
        let user = social_user(info(), "eyJ".into());

        assert_eq!(user.provider, "GOOGLE");
        assert_eq!(user.id, "1087");
        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.id_token, "eyJ");
    }

    #[tokio::test]
    async fn restores_unexpired_sign_in_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("sign_in.toml"));
        let provider = GoogleSignIn::with_store(creds(), store.clone());

        assert_eq!(provider.restore().await.unwrap(), None);

        let user = social_user(info(), "eyJ".into());
        store
            .save(&StoredSignIn {
                user: user.clone(),
                tokens: Tokens::new("ya29".into(), String::new(), 3600),
            })
            .unwrap();
        assert_eq!(provider.restore().await.unwrap(), Some(user.clone()));

        store
            .save(&StoredSignIn {
                user,
                tokens: Tokens::new("ya29".into(), String::new(), -10),
            })
            .unwrap();
        assert_eq!(provider.restore().await.unwrap(), None);
    }
}
