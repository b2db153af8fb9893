pub mod class;
pub mod holder;
pub mod object;

pub use class::{Class, Method};
pub use holder::ObjectHolder;
pub use object::{ClassInstance, Object};
