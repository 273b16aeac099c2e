pub mod journal;
pub mod reading;
