//! Enterprise Onboarding and Membership Workflows
//!
//! Every workflow that touches membership runs on one transaction and takes
//! a row lock on the user (`SELECT ... FOR UPDATE`), so two concurrent
//! attempts for the same user serialize. `UNIQUE(user_id)` on the membership
//! table backstops anything the lock cannot see.

use crate::domain::{
    CreateEnterpriseRequest, Enterprise, EnterpriseMember, EnterpriseOut, EnterpriseType,
    MemberRole, MemberStatus, User,
};
use crate::error::{Result, ServiceError};
use crate::repository::{EnterpriseRepository, UserRepository};
use crate::service::invite::InviteTokenStore;
use crate::service::mail::MailClient;
use crate::service::registry::{CompanySuggestion, RegistryClient};
use crate::service::token::TokenService;

const MAX_INVITE_TOKENS: usize = 100;

#[derive(Clone)]
pub struct EnterpriseService {
    enterprises: EnterpriseRepository,
    users: UserRepository,
    invites: InviteTokenStore,
    tokens: TokenService,
    mail: MailClient,
    registry: RegistryClient,
    base_url: String,
}

impl EnterpriseService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        enterprises: EnterpriseRepository,
        users: UserRepository,
        invites: InviteTokenStore,
        tokens: TokenService,
        mail: MailClient,
        registry: RegistryClient,
        base_url: String,
    ) -> Self {
        Self {
            enterprises,
            users,
            invites,
            tokens,
            mail,
            registry,
            base_url,
        }
    }

    /// Creates the enterprise with its contact, type-specific profiles, and
    /// the owner membership, all in one transaction.
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateEnterpriseRequest,
    ) -> Result<EnterpriseOut> {
        validate_profile_shape(request)?;

        let mut tx = self.enterprises.begin().await?;
        let user = self.lock_joinable_user(&mut tx, user_id).await?;

        let enterprise = self
            .enterprises
            .insert_enterprise(&mut tx, user.id, &request.name, request.enterprise_type)
            .await?;
        self.enterprises
            .insert_member(
                &mut tx,
                enterprise.id,
                user.id,
                MemberRole::Owner,
                MemberStatus::Active,
            )
            .await?;
        self.enterprises
            .insert_contact(&mut tx, enterprise.id, &request.contact)
            .await?;

        match request.enterprise_type {
            EnterpriseType::Individual => {
                let form = request.individual.as_ref().ok_or_else(|| {
                    ServiceError::validation("individual profile is required")
                })?;
                self.enterprises
                    .insert_individual_profile(&mut tx, enterprise.id, form)
                    .await?;
            }
            EnterpriseType::SoleProprietor | EnterpriseType::LegalEntity => {
                let form = request.legal_entity.as_ref().ok_or_else(|| {
                    ServiceError::validation("legal entity details are required")
                })?;
                let legal_entity = self
                    .enterprises
                    .insert_legal_entity(
                        &mut tx,
                        enterprise.id,
                        &form.inn,
                        &form.ogrn,
                        form.management_name.as_deref(),
                    )
                    .await?;
                if request.enterprise_type == EnterpriseType::LegalEntity {
                    let profile = form.profile.as_ref().ok_or_else(|| {
                        ServiceError::validation("legal entity profile is required")
                    })?;
                    self.enterprises
                        .insert_legal_entity_profile(&mut tx, legal_entity.id, profile)
                        .await?;
                }
            }
        }

        self.users.set_is_member(&mut tx, user.id, true).await?;
        tx.commit().await?;

        self.enterprises.load_full(enterprise).await
    }

    pub async fn personal(&self, enterprise: Enterprise) -> Result<EnterpriseOut> {
        self.enterprises.load_full(enterprise).await
    }

    /// Mints invite tokens keyed by the enterprise's tax identifier. An
    /// individual enterprise has none, so it cannot invite this way.
    pub async fn generate_tokens(
        &self,
        enterprise: &Enterprise,
        count: usize,
    ) -> Result<Vec<String>> {
        if count == 0 || count > MAX_INVITE_TOKENS {
            return Err(ServiceError::validation(format!(
                "token count must be between 1 and {MAX_INVITE_TOKENS}"
            )));
        }
        let inn = self.require_inn(enterprise).await?;
        self.invites.create(&inn, count).await
    }

    pub async fn list_tokens(&self, enterprise: &Enterprise) -> Result<Vec<String>> {
        let inn = self.require_inn(enterprise).await?;
        self.invites.list(&inn).await
    }

    /// Joins by an invite token minted for the target enterprise's INN. The
    /// token is consumed atomically before the membership insert; a token
    /// that was already consumed is indistinguishable from a bad one.
    pub async fn join_by_token(
        &self,
        user_id: i64,
        inn: &str,
        token: &str,
    ) -> Result<EnterpriseMember> {
        let enterprise = self
            .enterprises
            .get_by_inn(inn)
            .await?
            .ok_or(ServiceError::EnterpriseNotFound)?;

        let mut tx = self.enterprises.begin().await?;
        let user = self.lock_joinable_user(&mut tx, user_id).await?;

        if !self.invites.consume(inn, token).await? {
            return Err(ServiceError::JoinTokenInvalid);
        }

        let member = self
            .enterprises
            .insert_member(
                &mut tx,
                enterprise.id,
                user.id,
                MemberRole::Employee,
                MemberStatus::Active,
            )
            .await?;
        self.users.set_is_member(&mut tx, user.id, true).await?;
        tx.commit().await?;
        Ok(member)
    }

    /// Mails a signed join link for `email`. The token binds the address and
    /// the enterprise; only the account registered under that address can
    /// redeem it.
    pub async fn invite_by_email(&self, enterprise: &Enterprise, email: &str) -> Result<()> {
        let token = self.tokens.issue_join(enterprise.id, email)?;
        let link = format!("{}/enterprise/join-by-email/{}", self.base_url, token);
        self.mail.send_in_background(
            email.to_string(),
            format!("Invitation to join {}", enterprise.name),
            format!(
                "You have been invited to join {}. Follow the link to accept: {link}",
                enterprise.name
            ),
        );
        Ok(())
    }

    /// Redeems a mailed join link. Unauthenticated: the account is resolved
    /// by the email baked into the token.
    pub async fn join_by_email(&self, token: &str) -> Result<EnterpriseMember> {
        let claims = self.tokens.verify_join(token)?;
        let enterprise = self
            .enterprises
            .get_by_id(claims.enterprise_id)
            .await?
            .ok_or(ServiceError::EnterpriseNotFound)?;
        let user = self
            .users
            .get_by_email(&claims.email)
            .await?
            .ok_or(ServiceError::UserNotRegistered)?;

        let mut tx = self.enterprises.begin().await?;
        let user = self.lock_joinable_user(&mut tx, user.id).await?;

        let member = self
            .enterprises
            .insert_member(
                &mut tx,
                enterprise.id,
                user.id,
                MemberRole::Employee,
                MemberStatus::Active,
            )
            .await?;
        self.users.set_is_member(&mut tx, user.id, true).await?;
        tx.commit().await?;
        Ok(member)
    }

    /// Removes a member from the owner's enterprise. The owner membership
    /// itself cannot be revoked.
    pub async fn revoke_member(&self, enterprise: &Enterprise, member_id: i64) -> Result<()> {
        let member = self
            .enterprises
            .get_member_by_id(member_id)
            .await?
            .filter(|m| m.enterprise_id == enterprise.id)
            .ok_or(ServiceError::NotFound { entity: "member" })?;
        if member.role == MemberRole::Owner {
            return Err(ServiceError::forbidden("owner membership cannot be revoked"));
        }

        let mut tx = self.enterprises.begin().await?;
        self.enterprises.delete_member(&mut tx, member.id).await?;
        self.users
            .set_is_member(&mut tx, member.user_id, false)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<CompanySuggestion>> {
        self.registry.suggest(query).await
    }

    /// Locks the user row and checks every precondition for gaining a
    /// membership.
    async fn lock_joinable_user(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i64,
    ) -> Result<User> {
        let user = self
            .users
            .get_for_update(tx, user_id)
            .await?
            .ok_or(ServiceError::UserNotRegistered)?;
        if !user.is_verified {
            return Err(ServiceError::UserNotVerified);
        }
        if user.is_member {
            return Err(ServiceError::UserAlreadyInEnterprise);
        }
        Ok(user)
    }

    /// Tax identifier of the enterprise's legal entity; absence means the
    /// enterprise type does not support invite-by-INN.
    async fn require_inn(&self, enterprise: &Enterprise) -> Result<String> {
        let legal_entity = self
            .enterprises
            .get_legal_entity(enterprise.id)
            .await?
            .ok_or(ServiceError::InviteByInnNotAllowed)?;
        Ok(legal_entity.inn)
    }
}

/// Rejects payloads whose profile sections disagree with the declared type
/// before any row is written.
fn validate_profile_shape(request: &CreateEnterpriseRequest) -> Result<()> {
    match request.enterprise_type {
        EnterpriseType::Individual => {
            if request.individual.is_none() {
                return Err(ServiceError::validation(
                    "individual enterprises require the individual profile",
                ));
            }
            if request.legal_entity.is_some() {
                return Err(ServiceError::validation(
                    "individual enterprises must not carry legal entity details",
                ));
            }
        }
        EnterpriseType::SoleProprietor => {
            let Some(legal_entity) = &request.legal_entity else {
                return Err(ServiceError::validation(
                    "sole proprietors require legal entity details",
                ));
            };
            if legal_entity.profile.is_some() {
                return Err(ServiceError::validation(
                    "sole proprietors must not carry the extended legal entity profile",
                ));
            }
            if request.individual.is_some() {
                return Err(ServiceError::validation(
                    "sole proprietors must not carry the individual profile",
                ));
            }
        }
        EnterpriseType::LegalEntity => {
            let Some(legal_entity) = &request.legal_entity else {
                return Err(ServiceError::validation(
                    "legal entities require legal entity details",
                ));
            };
            if legal_entity.profile.is_none() {
                return Err(ServiceError::validation(
                    "legal entities require the extended legal entity profile",
                ));
            }
            if request.individual.is_some() {
                return Err(ServiceError::validation(
                    "legal entities must not carry the individual profile",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactForm, LegalEntityForm, LegalEntityProfileForm};

    fn contact() -> ContactForm {
        ContactForm {
            phone: "+7 900 000-00-00".to_string(),
            city: "Kaliningrad".to_string(),
            address: "Main st 1".to_string(),
        }
    }

    fn legal_entity(with_profile: bool) -> LegalEntityForm {
        LegalEntityForm {
            inn: "3906123456".to_string(),
            ogrn: "1023900000000".to_string(),
            management_name: None,
            profile: with_profile.then(|| LegalEntityProfileForm {
                org_name: "OOO Vector".to_string(),
                kpp: "390601001".to_string(),
                opf_full: "Limited liability company".to_string(),
                opf_short: "LLC".to_string(),
            }),
        }
    }

    #[test]
    fn test_individual_requires_individual_profile() {
        let request = CreateEnterpriseRequest {
            name: "Acme".to_string(),
            enterprise_type: EnterpriseType::Individual,
            contact: contact(),
            individual: None,
            legal_entity: None,
        };
        assert!(matches!(
            validate_profile_shape(&request),
            Err(ServiceError::Validation { .. })
        ));
    }

    #[test]
    fn test_sole_proprietor_rejects_extended_profile() {
        let request = CreateEnterpriseRequest {
            name: "Acme".to_string(),
            enterprise_type: EnterpriseType::SoleProprietor,
            contact: contact(),
            individual: None,
            legal_entity: Some(legal_entity(true)),
        };
        assert!(matches!(
            validate_profile_shape(&request),
            Err(ServiceError::Validation { .. })
        ));
    }

    #[test]
    fn test_legal_entity_requires_extended_profile() {
        let bare = CreateEnterpriseRequest {
            name: "Acme".to_string(),
            enterprise_type: EnterpriseType::LegalEntity,
            contact: contact(),
            individual: None,
            legal_entity: Some(legal_entity(false)),
        };
        assert!(validate_profile_shape(&bare).is_err());

        let full = CreateEnterpriseRequest {
            legal_entity: Some(legal_entity(true)),
            ..bare
        };
        assert!(validate_profile_shape(&full).is_ok());
    }
}
