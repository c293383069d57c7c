pub mod catalog;
pub mod memorize;
pub mod quiz;
