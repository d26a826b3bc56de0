use reqwest::StatusCode;

use crate::{
    Result, SyncError, info,
    management::SECTION_TRAKT,
    prompt::Prompt,
    success,
    types::{AuthSession, DeviceCode, DeviceCodeRequest, DeviceTokenRequest, RefreshTokenRequest, TokenResponse},
    utils, warning,
};

use super::TraktClient;

/// Out-of-band redirect URI registered on the Trakt application.
pub const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

impl TraktClient<'_> {
    /// Runs the OAuth device-code flow and stores the resulting token pair.
    ///
    /// # Flow
    ///
    /// 1. Requests a device code for the configured `client_id`
    /// 2. Shows the verification URL and user code, and tries to open the URL
    /// 3. Waits for the user to confirm they approved the application
    /// 4. Polls the token endpoint once per confirmation while Trakt still
    ///    answers `400` (approval pending)
    /// 5. Persists `access_token` and `refresh_token` to `[Trakt]`
    ///
    /// # Errors
    ///
    /// - `Cancelled` when the user cancels at a prompt; nothing is persisted
    /// - `ProviderAuth` for any poll status other than 200 or 400 (expired,
    ///   denied, already used)
    /// - `Persist` when the settings file cannot be written
    pub fn authenticate(&mut self, prompt: &mut dyn Prompt) -> Result<()> {
        let code = self.generate_device_code()?;

        info!(
            "Please go to {} and insert the following code: \"{}\"",
            code.verification_url, code.user_code
        );
        if code.expires_in > 0 {
            info!("The code expires in {} minutes.", code.expires_in / 60);
        }
        if !prompt.open_url(&code.verification_url) {
            warning!("Failed to open browser. Please navigate to the URL manually.");
        }

        let mut message = "I have authorized the application! Press ENTER to continue (q to cancel):";
        loop {
            if !prompt.confirm(message)? {
                return Err(SyncError::Cancelled);
            }

            if let Some(token) = self.poll_access_token(&code.device_code)? {
                self.store(token.into())?;
                success!("Successfully configured your Trakt.tv sync!");
                return Ok(());
            }

            message = "The device hasn't been authorized yet, please do so. Press ENTER to continue (q to cancel):";
        }
    }

    /// Exchanges the stored refresh token for a new token pair and persists it.
    pub fn refresh_access_token(&mut self) -> Result<()> {
        let refresh_token = self.settings.get(SECTION_TRAKT, "refresh_token")?;
        let payload = RefreshTokenRequest {
            refresh_token: &refresh_token,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            redirect_uri: REDIRECT_URI,
            grant_type: "refresh_token",
        };

        log::debug!("POST {}", self.url("/oauth/token"));
        let res = self.post("/oauth/token").json(&payload).send()?;
        let token: TokenResponse = utils::read_json(res, "Trakt token refresh")?;

        self.store(token.into())?;
        success!("Refreshed Trakt.tv access token successfully!");
        Ok(())
    }

    fn generate_device_code(&self) -> Result<DeviceCode> {
        let payload = DeviceCodeRequest {
            client_id: &self.client_id,
        };

        log::debug!("POST {}", self.url("/oauth/device/code"));
        let res = self.post("/oauth/device/code").json(&payload).send()?;
        utils::read_json(res, "Trakt device code request")
    }

    /// Polls the device token endpoint once.
    ///
    /// Returns `None` while the user has not approved the device yet.
    fn poll_access_token(&self, device_code: &str) -> Result<Option<TokenResponse>> {
        let payload = DeviceTokenRequest {
            code: device_code,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        let res = self.post("/oauth/device/token").json(&payload).send()?;
        log::debug!("POST /oauth/device/token -> {}", res.status());

        match res.status() {
            StatusCode::BAD_REQUEST => Ok(None),
            status if status.is_success() => {
                utils::read_json(res, "Trakt device token poll").map(Some)
            }
            status => Err(SyncError::ProviderAuth(format!(
                "Something went wrong ({status}), please try again."
            ))),
        }
    }

    fn store(&mut self, session: AuthSession) -> Result<()> {
        self.settings.store_session(SECTION_TRAKT, &session);
        self.settings.persist()
    }
}
