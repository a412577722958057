//! Registration and Email Confirmation

use crate::domain::{RegisterRequest, User};
use crate::error::{Result, ServiceError};
use crate::repository::UserRepository;
use crate::service::captcha::CaptchaClient;
use crate::service::mail::MailClient;
use crate::service::password::hash_password;
use crate::service::token::TokenService;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    tokens: TokenService,
    captcha: CaptchaClient,
    mail: MailClient,
    base_url: String,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        tokens: TokenService,
        captcha: CaptchaClient,
        mail: MailClient,
        base_url: String,
    ) -> Self {
        Self {
            users,
            tokens,
            captcha,
            mail,
            base_url,
        }
    }

    /// Registers an account and mails the confirmation link. The mail is
    /// fire-and-forget; registration succeeds even if the relay is down.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        self.captcha.verify(&request.captcha).await?;
        if request.password.len() < 8 {
            return Err(ServiceError::validation(
                "password must be at least 8 characters",
            ));
        }
        let hash = hash_password(&request.password)?;
        let user = self.users.create(&request.email, &hash).await?;

        let confirm_token = self.tokens.issue_access(user.id)?;
        let link = format!("{}/user/confirm/{}", self.base_url, confirm_token);
        self.mail.send_in_background(
            user.email.clone(),
            "Confirm your email".to_string(),
            format!("Follow the link to confirm your email: {link}"),
        );
        Ok(user)
    }

    /// Confirms the address behind a mailed link. Replaying a link that was
    /// already used succeeds again; the flag write is idempotent.
    pub async fn confirm_email(&self, token: &str) -> Result<User> {
        let user_id = self.tokens.verify_access(token)?;
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotRegistered)?;
        self.users.mark_verified(user.id).await?;
        Ok(User {
            is_verified: true,
            ..user
        })
    }
}
