//! Various utility modules.

pub mod base16;
