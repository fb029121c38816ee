//! Diesel table definitions mirroring `migrations/`.
//!
//! Keep in step with the SQL; `diesel print-schema` regenerates the tables
//! from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        name -> Varchar,
        /// Encoded argon2 hash.
        password_hash -> Text,
        /// Blogs created by the user, in creation order.
        blog_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog link entries.
    blogs (id) {
        id -> Uuid,
        title -> Text,
        author -> Text,
        url -> Text,
        likes -> Int4,
        /// Creator; cleared when the account is removed.
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(blogs, users);
