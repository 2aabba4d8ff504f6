pub mod health;
pub mod order;

pub use health::{health_config, not_found};
pub use order::order_config;
