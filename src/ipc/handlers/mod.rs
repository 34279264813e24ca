pub mod attendance;
pub mod backup_exchange;
pub mod core;
pub mod marks;
pub mod photo_assets;
pub mod roster;
pub mod search;
