//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts managed by the authentication service. Read-only here.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        /// Normalised, unique.
        phone_number -> Varchar,
        /// One of `consultant`, `contractor`, `owner`.
        role -> Varchar,
        projects_limit -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        location -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique on `(project_id, member_id)`.
    project_members (id) {
        id -> Uuid,
        project_id -> Uuid,
        member_id -> Uuid,
        phone_number -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    pricing_tenders (id) {
        id -> Uuid,
        project_id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    pricing_tender_contractors (tender_id, contractor_id) {
        tender_id -> Uuid,
        contractor_id -> Uuid,
    }
}

diesel::table! {
    offer_prices (id) {
        id -> Uuid,
        tender_id -> Uuid,
        title -> Varchar,
        /// Minor currency units.
        amount -> Int8,
        notes -> Nullable<Text>,
        submitted_by -> Uuid,
        date_created -> Timestamptz,
    }
}

diesel::table! {
    offer_price_comments (id) {
        id -> Uuid,
        offer_price_id -> Uuid,
        project_id -> Uuid,
        author_id -> Uuid,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> users (member_id));
diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(pricing_tenders -> projects (project_id));
diesel::joinable!(offer_prices -> pricing_tenders (tender_id));
diesel::joinable!(offer_price_comments -> offer_prices (offer_price_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    project_members,
    pricing_tenders,
    pricing_tender_contractors,
    offer_prices,
    offer_price_comments,
);
