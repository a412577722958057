//! Persistence Layer
//!
//! sqlx/Postgres repositories. Catalog tables go through the generic
//! tenant-scoped repos in [`scoped`]; users and enterprises have dedicated
//! repositories because their workflows are transactional.

mod catalog;
mod enterprises;
mod schema;
mod scoped;
mod users;

pub use enterprises::EnterpriseRepository;
pub use schema::init_schema;
pub use scoped::{ScopedEntity, SharedEntity, SharedRepo, TenantEntity, TenantRepo};
pub use users::{RefreshTokenRepository, UserRepository};
