pub mod products;
pub mod reviews;
