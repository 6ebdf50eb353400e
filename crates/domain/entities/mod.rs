pub mod admins;
pub mod contact_messages;
pub mod shipment_events;
pub mod shipments;
