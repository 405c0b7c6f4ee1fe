pub mod analysis;
pub mod locale;
pub mod purchase;
pub mod rental;
