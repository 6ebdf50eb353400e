pub mod admin_accounts;
pub mod admin_auth;
pub mod contact_messages;
pub mod dashboard;
pub mod shipments;
pub mod tracking_lookup;
