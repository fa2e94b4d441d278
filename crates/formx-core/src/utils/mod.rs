//! Utility types shared across formx crates.

pub mod multi_value_dict;

pub use multi_value_dict::MultiValueDict;
