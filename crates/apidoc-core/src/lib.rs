pub mod config;
pub mod error;
pub mod io;
pub mod parse;
pub mod pipeline;
pub mod transform;

pub use parse::spec::OpenApiSpec;
