//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    offer_price_comments, offer_prices, pricing_tenders, project_members, projects, users,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub phone_number: String,
    pub role: String,
    pub projects_limit: i32,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// `treat_none_as_null` so cleared fields are written as NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_members)]
pub(crate) struct NewProjectMemberRow<'a> {
    pub id: Uuid,
    pub project_id: Uuid,
    pub member_id: Uuid,
    pub phone_number: &'a str,
}

// ---------------------------------------------------------------------------
// Tenders and offers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pricing_tenders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PricingTenderRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offer_prices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferPriceRow {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub title: String,
    pub amount: i64,
    pub notes: Option<String>,
    pub submitted_by: Uuid,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offer_prices)]
pub(crate) struct NewOfferPriceRow<'a> {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub title: &'a str,
    pub amount: i64,
    pub notes: Option<&'a str>,
    pub submitted_by: Uuid,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = offer_prices)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct OfferPriceUpdate<'a> {
    pub title: &'a str,
    pub amount: i64,
    pub notes: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offer_price_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferPriceCommentRow {
    pub id: Uuid,
    pub offer_price_id: Uuid,
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offer_price_comments)]
pub(crate) struct NewOfferPriceCommentRow<'a> {
    pub id: Uuid,
    pub offer_price_id: Uuid,
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
}
