pub mod error;
pub mod matching_service;
pub mod offer_service;
pub mod order_service;
pub mod pricing_service;
