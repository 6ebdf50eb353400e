pub mod activity_types;
pub mod admin_roles;
pub mod message_statuses;
pub mod service_types;
