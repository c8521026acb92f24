pub mod commercemodel;
pub mod fieldmodel;
pub mod jobmodel;
pub mod offermodel;
pub mod operatormodel;
pub mod orgmodel;
pub mod ratemodel;
pub mod servicemodel;
