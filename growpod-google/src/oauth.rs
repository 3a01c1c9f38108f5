//! OAuth 2.0 authorization-code flow with a loopback redirect.

use anyhow::{Context, Result, bail};
use growpod_core::config::GoogleClientConfig;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, warn};
use url::Url;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

pub const SIGN_IN_SCOPES: &[&str] = &["openid", "email", "profile"];
pub const CALENDAR_SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

fn redirect_address(port: u16) -> String {
    format!("127.0.0.1:{}", port)
}

/// URL of Google's consent page for `scopes`. `state` comes back on the callback.
pub fn consent_url(creds: &GoogleClientConfig, scopes: &[&str], state: &str) -> Result<Url> {
    let mut url = Url::parse(AUTHORIZE_URL)?;
    url.query_pairs_mut()
        .append_pair("client_id", &creds.client_id)
        .append_pair("redirect_uri", &redirect_uri(creds.redirect_port))
        .append_pair("response_type", "code")
        .append_pair("scope", &scopes.join(" "))
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("state", state);
    Ok(url)
}

/// Show `url` to the user and try to open it in their browser.
pub fn open_in_browser(url: &str) {
    eprintln!("\nOpen this URL in your browser to continue:\n");
    eprintln!("{}\n", url);

    if open::that(url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }
}

/// The query of the redirect Google sends the browser to.
#[derive(Debug, PartialEq)]
pub struct Callback {
    pub code: String,
    pub state: String,
}

/// Parse the request line of the loopback redirect, e.g.
/// `GET /callback?code=...&state=... HTTP/1.1`.
pub fn parse_callback(request_line: &str) -> Result<Callback> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = Url::parse(&format!("http://localhost{}", url_part))?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };

    if let Some(error) = param("error") {
        bail!("Authorization was denied: {}", error);
    }

    let code = param("code").ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state = param("state").ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok(Callback { code, state })
}

/// Accept the browser's redirect on the loopback port and answer it.
pub async fn wait_for_callback(port: u16) -> Result<Callback> {
    let listener = TcpListener::bind(redirect_address(port))
        .await
        .context("Failed to bind OAuth callback listener")?;

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let callback = parse_callback(&request_line);

    let response = match &callback {
        Ok(_) => {
            "HTTP/1.1 200 OK\r\n\
            Content-Type: text/html\r\n\
            Connection: close\r\n\
            \r\n\
            <html><body>\
            <h1>Signed in to GrowPod!</h1>\
            <p>You can close this window and return to the terminal.</p>\
            </body></html>"
        }
        Err(_) => {
            "HTTP/1.1 400 Bad Request\r\n\
            Content-Type: text/html\r\n\
            Connection: close\r\n\
            \r\n\
            <html><body>\
            <h1>Sign-in failed</h1>\
            <p>Return to the terminal for details.</p>\
            </body></html>"
        }
    };

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    callback
}

/// Token endpoint response. `id_token` is present when `openid` was requested.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub expires_in: i64,
    pub id_token: Option<String>,
}

pub async fn exchange_code(
    http: &reqwest::Client,
    creds: &GoogleClientConfig,
    code: &str,
) -> Result<TokenResponse> {
    let redirect = redirect_uri(creds.redirect_port);
    let params = [
        ("code", code),
        ("client_id", creds.client_id.as_str()),
        ("client_secret", creds.client_secret.as_str()),
        ("redirect_uri", redirect.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = http
        .post(TOKEN_URL)
        .form(&params)
        .send()
        .await
        .context("Failed to send token request to Google")?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        bail!("Failed to exchange authorization code: {}", error_text);
    }

    response
        .json()
        .await
        .context("Failed to parse token response from Google")
}

/// OpenID Connect userinfo claims.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
}

pub async fn fetch_userinfo(http: &reqwest::Client, access_token: &str) -> Result<UserInfo> {
    let response = http
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .context("Failed to fetch Google profile")?;

    if !response.status().is_success() {
        bail!("Failed to fetch Google profile: HTTP {}", response.status());
    }

    response
        .json()
        .await
        .context("Failed to parse Google profile")
}

/// Revoke `token` at Google. Failures are logged; the local session is
/// dropped either way.
pub async fn revoke(http: &reqwest::Client, token: &str) {
    let result = http.post(REVOKE_URL).form(&[("token", token)]).send().await;

    match result {
        Ok(resp) if resp.status().is_success() => debug!("Revoked Google token"),
        Ok(resp) => warn!("Google token revocation returned HTTP {}", resp.status()),
        Err(e) => warn!("Could not revoke Google token: {e}"),
    }
}
