pub(crate) mod error;
pub mod hash;
#[macro_use]
pub(crate) mod log;
pub(crate) mod option;
pub(crate) mod panic;
pub(crate) mod result;
#[cfg(feature = "contiguous")]
pub(crate) mod sort;
