pub mod commercedtos;
pub mod fielddtos;
pub mod jobdtos;
pub mod offerdtos;
pub mod orgdtos;
pub mod quotedtos;
pub mod ratedtos;
