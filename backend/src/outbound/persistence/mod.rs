//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL through
//! `diesel-async` and a `bb8` pool.
//!
//! - Adapters only translate between row structs and domain types; row
//!   structs (`models.rs`) and table definitions (`schema.rs`) stay private.
//! - Rows are rebuilt through the validating domain constructors, so a corrupt
//!   row surfaces as a `Query` error rather than an invalid entity.
//! - Migrations in `backend/migrations` are embedded as [`MIGRATIONS`] and
//!   applied at startup.

mod diesel_basic_error_mapping;
mod diesel_offer_price_comment_repository;
mod diesel_offer_price_repository;
mod diesel_pricing_tender_repository;
mod diesel_project_member_repository;
mod diesel_project_repository;
mod diesel_user_directory;
mod models;
mod pool;
mod schema;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use diesel_offer_price_comment_repository::DieselOfferPriceCommentRepository;
pub use diesel_offer_price_repository::DieselOfferPriceRepository;
pub use diesel_pricing_tender_repository::DieselPricingTenderRepository;
pub use diesel_project_member_repository::DieselProjectMemberRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};

/// SQL migrations from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
