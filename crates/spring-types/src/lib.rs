pub mod derived;
pub mod enums;
pub mod material;
pub mod segment;
pub mod spec;

pub use derived::*;
pub use enums::*;
pub use material::*;
pub use segment::*;
pub use spec::*;
