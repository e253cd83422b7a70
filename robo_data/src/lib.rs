//! Shared program model for arena actor scripts.

pub mod defs;
pub mod validate;
pub mod vars;

pub use defs::*;
pub use validate::{ValidationError, declared_names, validate_program};
pub use vars::{Variables, is_valid_var_name};
