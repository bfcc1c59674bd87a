pub mod filter_service;
pub mod hiscores_service;
pub mod price_service;
pub mod profit_service;
pub mod recipe_service;
pub mod refresh_service;
pub mod tax_service;
