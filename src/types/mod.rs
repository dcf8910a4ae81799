//! Request options and response types.

pub mod account;
pub mod common;
pub mod enums;
pub mod proxy;

pub use account::*;
pub use common::*;
pub use enums::*;
pub use proxy::*;
