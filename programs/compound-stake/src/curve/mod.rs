pub mod compound;

pub use compound::*;
