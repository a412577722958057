//! Enterprise Persistence
//!
//! Onboarding writes several rows that must land together (enterprise,
//! owner membership, contact, type-specific profiles), so the write methods
//! take a [`Transaction`] owned by the calling workflow.

use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{
    Contact, ContactForm, Enterprise, EnterpriseMember, EnterpriseOut, EnterpriseType,
    IndividualForm, IndividualProfile, LegalEntity, LegalEntityProfile, LegalEntityProfileForm,
    MemberRole, MemberStatus,
};
use crate::error::{Result, ServiceError};

#[derive(Clone)]
pub struct EnterpriseRepository {
    pool: PgPool,
}

impl EnterpriseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    pub async fn insert_enterprise(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        name: &str,
        enterprise_type: EnterpriseType,
    ) -> Result<Enterprise> {
        Ok(sqlx::query_as::<_, Enterprise>(
            "INSERT INTO enterprises (owner_id, name, enterprise_type) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(owner_id)
        .bind(name)
        .bind(enterprise_type)
        .fetch_one(&mut **tx)
        .await?)
    }

    /// `UNIQUE(user_id)` on the membership table is the backstop against two
    /// concurrent joins; the violation surfaces as the business error.
    pub async fn insert_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enterprise_id: i64,
        user_id: i64,
        role: MemberRole,
        status: MemberStatus,
    ) -> Result<EnterpriseMember> {
        sqlx::query_as::<_, EnterpriseMember>(
            "INSERT INTO enterprise_members (enterprise_id, user_id, role, status) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(enterprise_id)
        .bind(user_id)
        .bind(role)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ServiceError::UserAlreadyInEnterprise
            }
            other => other.into(),
        })
    }

    pub async fn insert_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enterprise_id: i64,
        form: &ContactForm,
    ) -> Result<Contact> {
        Ok(sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (enterprise_id, phone, city, address) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(enterprise_id)
        .bind(&form.phone)
        .bind(&form.city)
        .bind(&form.address)
        .fetch_one(&mut **tx)
        .await?)
    }

    pub async fn insert_individual_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enterprise_id: i64,
        form: &IndividualForm,
    ) -> Result<IndividualProfile> {
        Ok(sqlx::query_as::<_, IndividualProfile>(
            "INSERT INTO individual_profiles (enterprise_id, first_name, last_name, patronymic) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(enterprise_id)
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.patronymic)
        .fetch_one(&mut **tx)
        .await?)
    }

    pub async fn insert_legal_entity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enterprise_id: i64,
        inn: &str,
        ogrn: &str,
        management_name: Option<&str>,
    ) -> Result<LegalEntity> {
        sqlx::query_as::<_, LegalEntity>(
            "INSERT INTO legal_entities (enterprise_id, inn, ogrn, management_name) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(enterprise_id)
        .bind(inn)
        .bind(ogrn)
        .bind(management_name)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| ServiceError::conflict_on_unique(e, "legal entity", "inn"))
    }

    pub async fn insert_legal_entity_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        legal_entity_id: i64,
        form: &LegalEntityProfileForm,
    ) -> Result<LegalEntityProfile> {
        Ok(sqlx::query_as::<_, LegalEntityProfile>(
            "INSERT INTO legal_entity_profiles \
             (legal_entity_id, org_name, kpp, opf_full, opf_short) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(legal_entity_id)
        .bind(&form.org_name)
        .bind(&form.kpp)
        .bind(&form.opf_full)
        .bind(&form.opf_short)
        .fetch_one(&mut **tx)
        .await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Enterprise>> {
        Ok(
            sqlx::query_as::<_, Enterprise>("SELECT * FROM enterprises WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    pub async fn get_by_owner(&self, owner_id: i64) -> Result<Option<Enterprise>> {
        Ok(
            sqlx::query_as::<_, Enterprise>("SELECT * FROM enterprises WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Looks an enterprise up by the tax identifier of its legal entity.
    pub async fn get_by_inn(&self, inn: &str) -> Result<Option<Enterprise>> {
        Ok(sqlx::query_as::<_, Enterprise>(
            "SELECT e.* FROM enterprises e \
             JOIN legal_entities le ON le.enterprise_id = e.id \
             WHERE le.inn = $1",
        )
        .bind(inn)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// The membership row of `user_id`, if any. A user holds at most one.
    pub async fn get_membership(&self, user_id: i64) -> Result<Option<EnterpriseMember>> {
        Ok(sqlx::query_as::<_, EnterpriseMember>(
            "SELECT * FROM enterprise_members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn get_member_by_id(&self, member_id: i64) -> Result<Option<EnterpriseMember>> {
        Ok(sqlx::query_as::<_, EnterpriseMember>(
            "SELECT * FROM enterprise_members WHERE id = $1",
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn list_members(&self, enterprise_id: i64) -> Result<Vec<EnterpriseMember>> {
        Ok(sqlx::query_as::<_, EnterpriseMember>(
            "SELECT * FROM enterprise_members WHERE enterprise_id = $1 ORDER BY id",
        )
        .bind(enterprise_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Deleting the row (rather than flipping status) frees `UNIQUE(user_id)`
    /// so the user can join elsewhere.
    pub async fn delete_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member_id: i64,
    ) -> Result<()> {
        sqlx::query("DELETE FROM enterprise_members WHERE id = $1")
            .bind(member_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn get_legal_entity(&self, enterprise_id: i64) -> Result<Option<LegalEntity>> {
        Ok(sqlx::query_as::<_, LegalEntity>(
            "SELECT * FROM legal_entities WHERE enterprise_id = $1",
        )
        .bind(enterprise_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_contact(&self, enterprise_id: i64) -> Result<Option<Contact>> {
        Ok(
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE enterprise_id = $1")
                .bind(enterprise_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_individual_profile(
        &self,
        enterprise_id: i64,
    ) -> Result<Option<IndividualProfile>> {
        Ok(sqlx::query_as::<_, IndividualProfile>(
            "SELECT * FROM individual_profiles WHERE enterprise_id = $1",
        )
        .bind(enterprise_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_legal_entity_profile(
        &self,
        legal_entity_id: i64,
    ) -> Result<Option<LegalEntityProfile>> {
        Ok(sqlx::query_as::<_, LegalEntityProfile>(
            "SELECT * FROM legal_entity_profiles WHERE legal_entity_id = $1",
        )
        .bind(legal_entity_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Full aggregate for enterprise reads: members, contact, and whichever
    /// type-specific profiles the enterprise carries.
    pub async fn load_full(&self, enterprise: Enterprise) -> Result<EnterpriseOut> {
        let members = self.list_members(enterprise.id).await?;
        let contact = self.get_contact(enterprise.id).await?;
        let individual_profile = self.get_individual_profile(enterprise.id).await?;
        let legal_entity = self.get_legal_entity(enterprise.id).await?;
        let legal_entity_profile = match &legal_entity {
            Some(le) => self.get_legal_entity_profile(le.id).await?,
            None => None,
        };
        Ok(EnterpriseOut {
            enterprise,
            members,
            contact,
            individual_profile,
            legal_entity,
            legal_entity_profile,
        })
    }
}
