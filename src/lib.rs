pub use hull_core::*;
pub use hull_macros::*;
