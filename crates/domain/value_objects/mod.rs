pub mod activity;
pub mod admins;
pub mod contact_messages;
pub mod dashboard;
pub mod enums;
pub mod shipments;
pub mod tracking;
