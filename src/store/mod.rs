pub mod file;
pub mod mem;
pub mod traits;

pub use file::*;
pub use mem::*;
pub use traits::*;
