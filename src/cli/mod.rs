pub mod docs;
pub mod package;
pub mod plugin;
