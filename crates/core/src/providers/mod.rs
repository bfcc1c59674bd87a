pub mod registry;
pub mod traits;

// Data source and hiscores implementations
pub mod local_dir;
pub mod static_http;
pub mod wise_old_man;
