pub mod roster;
pub mod segment;
pub mod transcript;
pub mod word;

pub use roster::*;
pub use segment::*;
pub use transcript::*;
pub use word::*;
