//! OAuth 2.0 PKCE flow for Google APIs.
//!
//! Authorization Code flow with PKCE (RFC 7636) and a loopback redirect, as
//! used by installed applications.
//!
//! # Flow Overview
//!
//! 1. Generate a code verifier and its SHA-256 challenge
//! 2. Bind a local HTTP listener on 127.0.0.1
//! 3. Open the user's browser to the consent page
//! 4. Google redirects to the listener with an authorization code
//! 5. Exchange the code (with verifier) for an access token
//!
//! Tokens are returned to the caller and never written to disk.

use std::io::{BufRead, BufReader, Write};
use std::net::{Ipv4Addr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng as _;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::Credential;

use super::config::OAuthCredentials;

/// The PKCE code verifier length (in bytes, before base64 encoding).
const CODE_VERIFIER_LENGTH: usize = 32;

/// Path the browser is redirected to.
const CALLBACK_PATH: &str = "/callback";

const SUCCESS_PAGE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n\
    <html><body><h1>Authorization Successful</h1>\
    <p>You can close this window and return to the terminal.</p></body></html>";

const FAILURE_PAGE: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n\
    <html><body><h1>Authorization Failed</h1>\
    <p>You can close this window.</p></body></html>";

/// OAuth client for Google APIs.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            credentials,
            http_client,
        })
    }

    /// Runs the consent flow and returns the obtained credential.
    ///
    /// Binds `127.0.0.1:port` (0 picks a free port), opens the browser, waits
    /// up to `callback_timeout` for the redirect, then exchanges the code.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The loopback port cannot be bound
    /// - The user denies authorization or the callback times out
    /// - The state parameter does not match
    /// - Token exchange fails
    pub async fn authorize(
        &self,
        scopes: &[String],
        port: u16,
        callback_timeout: Duration,
    ) -> ProviderResult<Credential> {
        let pkce = PkceFlow::new();

        let (listener, port) = Self::bind_loopback_server(port)?;
        let redirect_uri = format!("http://127.0.0.1:{}{}", port, CALLBACK_PATH);

        let auth_url = pkce.build_auth_url(
            &self.credentials.auth_uri,
            &self.credentials.client_id,
            &redirect_uri,
            scopes,
        )?;

        info!("starting OAuth flow, opening browser...");
        debug!("authorization URL: {}", auth_url);

        if let Err(e) = open::that(&auth_url) {
            warn!("failed to open browser: {}", e);
            eprintln!("\nPlease open this URL in your browser:\n\n{}\n", auth_url);
        }

        let (code, received_state) = Self::wait_for_callback(listener, callback_timeout)?;

        if received_state != pkce.state {
            return Err(ProviderError::authentication(
                "OAuth state mismatch - possible CSRF attack",
            ));
        }

        info!("received authorization code, exchanging for tokens...");

        self.exchange_code(&code, &pkce.verifier, &redirect_uri, scopes)
            .await
    }

    /// Exchanges an authorization code for a credential.
    async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
        scopes: &[String],
    ) -> ProviderResult<Credential> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                ProviderError::network(format!("token exchange request failed: {}", e))
                    .with_source(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::authentication(format!(
                "token exchange failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("invalid token response: {}", e))
        })?;

        let granted = match token_response.scope {
            Some(scope) => scope.split_whitespace().map(String::from).collect(),
            None => scopes.to_vec(),
        };

        let credential = Credential::new(
            token_response.access_token,
            token_response.refresh_token,
            token_response.expires_in,
            granted,
        );
        if !credential.has_scopes(scopes) {
            warn!(granted = ?credential.scopes, "not every requested scope was granted");
        }

        info!("successfully obtained tokens");
        Ok(credential)
    }

    /// Binds the loopback listener and returns it with its actual port.
    fn bind_loopback_server(port: u16) -> ProviderResult<(TcpListener, u16)> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).map_err(|e| {
            ProviderError::configuration(format!("cannot bind 127.0.0.1:{}: {}", port, e))
                .with_source(e)
        })?;
        let port = listener
            .local_addr()
            .map_err(|e| {
                ProviderError::internal(format!("failed to read listener address: {}", e))
            })?
            .port();
        debug!("bound loopback server on port {}", port);
        Ok((listener, port))
    }

    /// Waits for the OAuth callback and extracts the authorization code and state.
    fn wait_for_callback(
        listener: TcpListener,
        timeout: Duration,
    ) -> ProviderResult<(String, String)> {
        listener
            .set_nonblocking(false)
            .map_err(|e| ProviderError::internal(format!("failed to set blocking: {}", e)))?;

        let (tx, rx) = mpsc::channel();

        // Accept in a separate thread so the wait can time out
        let _handle = thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        if let Some(result) = Self::handle_callback(stream) {
                            let _ = tx.send(result);
                            return;
                        }
                    }
                    Err(e) => {
                        error!("failed to accept connection: {}", e);
                    }
                }
            }
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Err(ProviderError::authentication("OAuth callback timeout"))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(ProviderError::internal("callback channel disconnected"))
            }
        }
    }

    /// Handles one HTTP request on the callback server.
    ///
    /// Returns `None` for requests that are not the callback (e.g. favicon).
    fn handle_callback(mut stream: TcpStream) -> Option<ProviderResult<(String, String)>> {
        let mut request_line = String::new();
        BufReader::new(&stream).read_line(&mut request_line).ok()?;

        let result = parse_callback(&request_line)?;

        let page = if result.is_ok() {
            SUCCESS_PAGE
        } else {
            FAILURE_PAGE
        };
        let _ = stream.write_all(page.as_bytes());
        let _ = stream.flush();

        Some(result)
    }
}

/// Parses a request line like `GET /callback?code=...&state=... HTTP/1.1`.
fn parse_callback(request_line: &str) -> Option<ProviderResult<(String, String)>> {
    let mut parts = request_line.split_whitespace();
    if parts.next() != Some("GET") {
        return None;
    }
    let target = parts.next()?;

    let url = Url::parse("http://127.0.0.1").ok()?.join(target).ok()?;
    if url.path() != CALLBACK_PATH {
        return None;
    }

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Some(Err(ProviderError::authentication(format!(
            "authorization denied: {}",
            error
        ))));
    }

    Some(match (code, state) {
        (Some(code), Some(state)) => Ok((code, state)),
        (Some(_), None) => Err(ProviderError::authentication(
            "missing state in callback",
        )),
        _ => Err(ProviderError::authentication(
            "missing authorization code in callback",
        )),
    })
}

/// PKCE flow state and utilities.
///
/// Implements RFC 7636 (Proof Key for Code Exchange).
#[derive(Debug)]
pub struct PkceFlow {
    /// The code verifier (high-entropy random string).
    pub verifier: String,
    /// The code challenge (SHA-256 hash of verifier, base64url encoded).
    pub challenge: String,
    /// Random state for CSRF protection.
    pub state: String,
}

impl PkceFlow {
    /// Creates a new PKCE flow with random verifier and state.
    pub fn new() -> Self {
        let verifier = random_token(CODE_VERIFIER_LENGTH);
        let challenge = Self::compute_challenge(&verifier);
        let state = random_token(16);

        Self {
            verifier,
            challenge,
            state,
        }
    }

    /// Computes the SHA-256 challenge for a code verifier.
    fn compute_challenge(verifier: &str) -> String {
        let digest = Sha256::digest(verifier.as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }

    /// Builds the consent URL on top of `auth_uri`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `auth_uri` is not a valid URL.
    pub fn build_auth_url(
        &self,
        auth_uri: &str,
        client_id: &str,
        redirect_uri: &str,
        scopes: &[String],
    ) -> ProviderResult<String> {
        let scope = scopes.join(" ");
        let url = Url::parse_with_params(
            auth_uri,
            &[
                ("client_id", client_id),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("code_challenge", self.challenge.as_str()),
                ("code_challenge_method", "S256"),
                ("state", self.state.as_str()),
            ],
        )
        .map_err(|e| {
            ProviderError::configuration(format!("invalid auth_uri {:?}: {}", auth_uri, e))
                .with_source(e)
        })?;
        Ok(url.into())
    }
}

impl Default for PkceFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..len).map(|_| rng.random()).collect();
    URL_SAFE_NO_PAD.encode(&bytes)
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}
