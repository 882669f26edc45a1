pub mod chat;
pub mod footer;
pub mod header;
pub mod sidebar;
