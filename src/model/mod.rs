pub mod action;
pub mod architecture;
pub mod common;
pub mod document;
pub mod inputs;

pub use action::*;
pub use architecture::*;
pub use common::*;
pub use document::*;
pub use inputs::*;
