//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Int8,
        email -> Varchar,
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tags, each owned by one user.
    tags (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Recipes, each owned by one user.
    recipes (id) {
        id -> Int8,
        user_id -> Int8,
        title -> Varchar,
        time_minutes -> Int4,
        /// `NUMERIC(5, 2)`.
        price -> Numeric,
        link -> Varchar,
    }
}

diesel::table! {
    /// Join table between recipes and tags.
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::joinable!(tags -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(users, tags, recipes, recipe_tags);
