//! Common macros for the domain layer.

mod entities;
mod registry;
