pub mod type_index;

pub use type_index::TypeIndex;
