pub mod ecommerce;
pub mod fields;
pub mod jobs;
pub mod offers;
pub mod orgs;
pub mod quotes;
pub mod rates;
