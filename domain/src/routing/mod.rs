//! Model routing by command keywords

pub mod router;

pub use router::{Router, RouterRule};
