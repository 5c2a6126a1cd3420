//! Types - scalar values for the wrensql execution engine
//!
//! This crate provides the runtime value representation shared by the
//! storage and executor layers, together with SQL comparison semantics.

mod data_type;
mod sql_value;

pub use data_type::DataType;
pub use sql_value::SqlValue;
