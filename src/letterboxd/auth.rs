use reqwest::{Method, StatusCode};

use crate::{
    Result, SyncError, info,
    management::SECTION_LETTERBOXD,
    prompt::Prompt,
    success,
    types::{AuthSession, TokenResponse},
    utils,
};

use super::{LetterboxdClient, SignaturePlacement};

impl LetterboxdClient<'_> {
    /// Signs in with the user's Letterboxd credentials and stores the token
    /// pair.
    ///
    /// Prompts for the username and, without echo, the password. A `400`
    /// from Letterboxd means the credentials were rejected; in that case
    /// nothing is written to the settings file.
    pub fn authenticate(&mut self, prompt: &mut dyn Prompt) -> Result<()> {
        info!("Sign in with your Letterboxd account.");
        let username = prompt.input("Username:")?;
        let password = prompt.password("Password:")?;

        let token = self.request_token(
            &[
                ("grant_type", "password"),
                ("username", username.trim()),
                ("password", password.as_str()),
            ],
            "Invalid Letterboxd credentials, please try again.",
        )?;

        self.store(token.into())?;
        success!("Successfully configured your Letterboxd sync!");
        Ok(())
    }

    /// Exchanges the stored refresh token for a new token pair and persists it.
    ///
    /// A `400` means the refresh token is no longer valid and the user has to
    /// run `letterboxd_authenticate` again.
    pub fn refresh_access_token(&mut self) -> Result<()> {
        let refresh_token = self.settings.get(SECTION_LETTERBOXD, "refresh_token")?;

        let token = self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ],
            "Letterboxd needs re-authentication, run --contentType letterboxd_authenticate.",
        )?;

        self.store(token.into())?;
        success!("Refreshed Letterboxd access token successfully!");
        Ok(())
    }

    fn request_token(&self, form: &[(&str, &str)], rejected: &str) -> Result<TokenResponse> {
        let builder = self.request(Method::POST, "/auth/token").form(form);
        let request = self.sign(builder, SignaturePlacement::Header)?;
        let res = self.execute(request)?;

        if res.status() == StatusCode::BAD_REQUEST {
            return Err(SyncError::ProviderAuth(rejected.to_string()));
        }
        utils::read_json(res, "Letterboxd token request")
    }

    fn store(&mut self, session: AuthSession) -> Result<()> {
        self.settings.store_session(SECTION_LETTERBOXD, &session);
        self.settings.persist()
    }
}
