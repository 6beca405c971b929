//! Thin wrappers over the `log` facade. With the `logging` feature disabled the arguments are
//! still type checked, but nothing is formatted or emitted.

macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "logging")]
        ::log::debug!(target: "arena_std", $($arg)+);
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($arg)+);
        }
    };
}

macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "logging")]
        ::log::trace!(target: "arena_std", $($arg)+);
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($arg)+);
        }
    };
}

#[allow(unused_imports)]
pub(crate) use {debug, trace};
