pub mod admin_accounts;
pub mod admin_auth;
pub mod contact;
pub mod dashboard;
pub mod messages;
pub mod shipments;
pub mod tracking;
