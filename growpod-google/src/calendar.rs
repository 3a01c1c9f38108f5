//! Google Calendar access for the schedule page.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use google_calendar::Client;
use google_calendar::types::{OrderBy, SendUpdates};
use growpod_core::GrowPodResult;
use growpod_core::calendar::{CalendarEvent, CalendarProvider, DayRange, ProviderEvent};
use growpod_core::config::GoogleClientConfig;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::convert::{from_google, to_google};
use crate::oauth::{self, CALENDAR_SCOPES};
use crate::token_store::{TokenStore, Tokens};
use crate::{base_dir, calendar_error};

pub struct GoogleCalendar {
    creds: GoogleClientConfig,
    store: TokenStore,
    tokens: Mutex<Option<Tokens>>,
}

impl GoogleCalendar {
    pub fn new(creds: GoogleClientConfig) -> GrowPodResult<Self> {
        let store = TokenStore::new(base_dir()?.join("calendar.toml"));
        Ok(Self::with_store(creds, store))
    }

    pub fn with_store(creds: GoogleClientConfig, store: TokenStore) -> Self {
        GoogleCalendar {
            creds,
            store,
            tokens: Mutex::new(None),
        }
    }

    fn api_client(&self, tokens: &Tokens) -> Client {
        Client::new(
            self.creds.client_id.clone(),
            self.creds.client_secret.clone(),
            oauth::redirect_uri(self.creds.redirect_port),
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
        )
    }

    /// Loads the stored grant into memory. Expired tokens still count
    /// while a refresh token can renew them.
    async fn stored_grant(&self) -> Result<bool> {
        let mut guard = self.tokens.lock().await;
        if guard.is_none() {
            *guard = self.store.load::<Tokens>()?;
        }

        Ok(guard
            .as_ref()
            .is_some_and(|t| !t.is_expired() || !t.refresh_token.is_empty()))
    }

    async fn consent(&self) -> Result<()> {
        let scopes: Vec<String> = CALENDAR_SCOPES.iter().map(|s| s.to_string()).collect();

        let mut client = Client::new(
            self.creds.client_id.clone(),
            self.creds.client_secret.clone(),
            oauth::redirect_uri(self.creds.redirect_port),
            String::new(),
            String::new(),
        );

        // Always show the consent screen so Google returns a refresh token.
        let auth_url = format!("{}&prompt=consent", client.user_consent_url(&scopes));
        oauth::open_in_browser(&auth_url);

        let callback = oauth::wait_for_callback(self.creds.redirect_port).await?;
        let access_token = client
            .get_access_token(&callback.code, &callback.state)
            .await
            .context("Failed to exchange authorization code")?;

        let tokens = Tokens::new(
            access_token.access_token,
            access_token.refresh_token,
            access_token.expires_in,
        );
        self.store.save(&tokens)?;
        *self.tokens.lock().await = Some(tokens);

        Ok(())
    }

    /// A client with a valid access token, refreshing it when expired.
    async fn client(&self) -> Result<Client> {
        let mut guard = self.tokens.lock().await;

        if guard.is_none() {
            *guard = self.store.load::<Tokens>()?;
        }
        let Some(tokens) = guard.as_mut() else {
            bail!("Google Calendar access has not been granted");
        };

        if tokens.is_expired() {
            debug!("Refreshing Google Calendar access token");
            let mut refreshed = self
                .api_client(tokens)
                .refresh_access_token()
                .await
                .context("Failed to refresh token")?;

            // Google typically doesn't return a new refresh_token on refresh
            if refreshed.refresh_token.is_empty() {
                refreshed.refresh_token = tokens.refresh_token.clone();
            }

            *tokens = Tokens::new(
                refreshed.access_token,
                refreshed.refresh_token,
                refreshed.expires_in,
            );
            self.store.save(&*tokens)?;
        }

        Ok(self.api_client(tokens))
    }

    async fn list(&self, calendar_id: &str, range: &DayRange) -> Result<Vec<ProviderEvent>> {
        let client = self.client().await?;
        let time_min = range.start.to_rfc3339();
        let time_max = range.end.to_rfc3339();

        let response = client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::StartTime,
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // expand recurring events
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .context("Failed to fetch events")?;

        let events = response
            .body
            .into_iter()
            .filter_map(|event| {
                let id = event.id.clone();
                match from_google(event) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(event = %id, "Skipping event: {e}");
                        None
                    }
                }
            })
            .collect();

        Ok(events)
    }

    async fn insert(&self, calendar_id: &str, event: &CalendarEvent) -> Result<()> {
        let client = self.client().await?;
        let google_event = to_google(event);

        client
            .events()
            .insert(
                calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", &google_event.summary))?;

        Ok(())
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn has_consent(&self) -> bool {
        match self.stored_grant().await {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Ignoring stored calendar access: {e:#}");
                false
            }
        }
    }

    async fn request_consent(&self) -> GrowPodResult<()> {
        self.consent().await.map_err(calendar_error)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        range: &DayRange,
    ) -> GrowPodResult<Vec<ProviderEvent>> {
        self.list(calendar_id, range).await.map_err(calendar_error)
    }

    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent) -> GrowPodResult<()> {
        self.insert(calendar_id, event).await.map_err(calendar_error)
    }
}
