pub mod filter;
pub mod order;
pub mod pagination;

pub use filter::*;
pub use order::*;
pub use pagination::*;
