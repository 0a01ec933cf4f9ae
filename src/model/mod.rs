//! Domain value types shared by every stage of the pipeline.

pub mod command;
pub mod error;
pub mod ids;
pub mod stream;

pub use command::*;
pub use error::*;
pub use ids::*;
pub use stream::*;
