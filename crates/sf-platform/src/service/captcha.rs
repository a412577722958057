//! Captcha Verification Client
//!
//! Validates the captcha response token submitted with registration against
//! the provider's verification endpoint. With no endpoint configured the
//! check is skipped, which is the local-development mode.

use serde::Deserialize;

use crate::config::CaptchaConfig;
use crate::error::{Result, ServiceError};

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
}

#[derive(Clone)]
pub struct CaptchaClient {
    http: reqwest::Client,
    config: CaptchaConfig,
}

impl CaptchaClient {
    pub fn new(http: reqwest::Client, config: CaptchaConfig) -> Self {
        Self { http, config }
    }

    pub async fn verify(&self, response_token: &str) -> Result<()> {
        if self.config.verify_url.is_empty() {
            tracing::debug!("captcha verification disabled");
            return Ok(());
        }
        let response = self
            .http
            .post(&self.config.verify_url)
            .form(&[
                ("secret", self.config.secret.as_str()),
                ("response", response_token),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Upstream {
                message: format!("captcha provider unreachable: {e}"),
            })?;
        let verdict: VerifyResponse =
            response.json().await.map_err(|e| ServiceError::Upstream {
                message: format!("captcha provider returned malformed response: {e}"),
            })?;
        if !verdict.success {
            return Err(ServiceError::CaptchaNotVerified);
        }
        Ok(())
    }
}
