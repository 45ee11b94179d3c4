pub mod catalog;
pub mod classifier;
pub mod error;
pub mod review;
pub mod sample;
pub mod shop_api;
