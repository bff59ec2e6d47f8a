//! Response cache adapters

mod json_file;

pub use json_file::JsonFileCache;
