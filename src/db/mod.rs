pub mod commercedb;
pub mod db;
pub mod fielddb;
pub mod jobdb;
pub mod offerdb;
pub mod operatordb;
pub mod orgdb;
pub mod ratedb;
