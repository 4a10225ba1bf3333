pub mod codegen;
pub mod config;
pub mod constants;
pub mod driver;
pub mod helpers;
