pub mod filter;
pub mod item;
pub mod price;
pub mod profit;
pub mod recipe;
pub mod settings;
pub mod skills;
pub mod tax;
