//! Terminal presentation of the converter

pub mod convert;
pub mod demo;
pub mod rates;
pub mod setup;
pub mod ui;
