//! Business Services
//!
//! Workflow logic between the HTTP layer and the repositories, plus thin
//! clients for the external collaborators (mail relay, captcha provider,
//! company registry).

mod auth;
mod captcha;
mod enterprise;
mod invite;
mod mail;
mod password;
mod registry;
mod token;
mod users;

pub use auth::{AuthService, SessionTokens};
pub use captcha::CaptchaClient;
pub use enterprise::EnterpriseService;
pub use invite::InviteTokenStore;
pub use mail::MailClient;
pub use registry::{CompanySuggestion, RegistryClient};
pub use token::{generate_opaque_token, JoinClaims, TokenService};
pub use users::UserService;
