pub mod parser;
pub mod pipeline;
pub mod record;
pub mod schema;

pub use record::{Record, Submission};
