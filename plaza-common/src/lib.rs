pub mod filter;
pub mod load;
pub mod model;
pub mod page;
pub mod session;
