//! Wiring shared by every command: config, REST client and sign-in session.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use growpod_core::api::{GrowPodClient, HttpTransport};
use growpod_core::calendar::CalendarSession;
use growpod_core::config::GrowPodConfig;
use growpod_core::session::{OAuthSession, SocialUser, UserRepository};
use growpod_google::{GoogleCalendar, GoogleSignIn};
use tracing::{debug, warn};

pub struct App {
    pub config: GrowPodConfig,
    pub client: GrowPodClient,
    session: Option<OAuthSession>,
}

impl App {
    /// Load config, connect the client and pick up a stored sign-in.
    pub async fn init() -> Result<Self> {
        let config = GrowPodConfig::load()?;
        let transport = HttpTransport::new(config.server_url()?, config.request_timeout())?;
        let client = GrowPodClient::new(Arc::new(transport));

        let session = match &config.google {
            Some(creds) => {
                let provider = GoogleSignIn::new(creds.clone())?;
                let users = UserRepository::open_default()?;
                let mut session = OAuthSession::new(Arc::new(provider), users, client.clone());

                match session.resume().await {
                    Ok(true) => debug!("Restored stored sign-in"),
                    Ok(false) => debug!("No stored sign-in"),
                    Err(e) => warn!("Could not restore sign-in: {e}"),
                }
                Some(session)
            }
            None => None,
        };

        Ok(App {
            config,
            client,
            session,
        })
    }

    fn not_configured(&self) -> anyhow::Error {
        match self.config.google() {
            Err(e) => e.into(),
            Ok(_) => anyhow!("Google sign-in is not configured"),
        }
    }

    pub fn session(&self) -> Result<&OAuthSession> {
        match &self.session {
            Some(session) => Ok(session),
            None => Err(self.not_configured()),
        }
    }

    pub fn session_mut(&mut self) -> Result<&mut OAuthSession> {
        if self.session.is_none() {
            return Err(self.not_configured());
        }
        self.session
            .as_mut()
            .ok_or_else(|| anyhow!("Google sign-in is not configured"))
    }

    pub fn user(&self) -> Option<&SocialUser> {
        self.session.as_ref().and_then(OAuthSession::user_data)
    }

    pub fn require_user(&self) -> Result<&SocialUser> {
        self.user()
            .ok_or_else(|| anyhow!("Not signed in.\n\nSign in with:\n  growpod login"))
    }

    /// A fresh calendar session. Stored Google tokens are reused; consent is
    /// asked for on first use only when none are usable.
    pub fn calendar(&self) -> Result<CalendarSession> {
        let creds = self.config.google()?;
        let provider = GoogleCalendar::new(creds.clone())?;
        Ok(CalendarSession::new(Arc::new(provider)))
    }
}
