//! Intermediate representation and lowering engine for VDL schemas

pub mod config;
pub mod docs;
pub mod error;
pub mod ir;
pub mod lower;
pub mod program;
pub mod schema;
pub mod types;

pub use config::{BuildConfig, EmitConfig};
pub use error::CoreError;
pub use ir::IrSchema;
pub use lower::{from_program, from_program_with, lower_with_stats, ResolverStats};
pub use program::{Program, ProgramBuilder};
pub use schema::ir_json_schema;
pub use types::{TypeRef, Value};
