pub mod admins;
pub mod contact_messages;
pub mod shipments;
