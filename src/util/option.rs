use std::hint;

pub(crate) trait OptionExtension<T> {
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    /// Unwraps an [`Option`] that the surrounding data structure guarantees to be [`Some`]: an
    /// owned chunk slot that a live handle points to, or a free slot in a table that was sized to
    /// fit every entry. Debug builds check the claim with [`unreachable!`], release builds use
    /// [`unreachable_unchecked`](hint::unreachable_unchecked).
    ///
    /// No panics or safety sections are written for this helper, because calling it is itself the
    /// statement that [`None`] cannot occur.
    #[track_caller]
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: It is the responsibility of the caller to ensure that None is impossible when
            // invoking this method.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}
