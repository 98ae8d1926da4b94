//! Application module

pub mod cli;
pub mod run;
pub mod startup;
