pub mod array;
pub mod table;

pub use array::ElementArray;
pub use table::{fnv1a, MemberTable};
