pub mod codegen;
pub mod command;
pub mod error;
