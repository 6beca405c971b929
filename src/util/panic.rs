/// Asserts that evaluating the block panics.
///
/// Arena-backed values hold `&Arena`, which is not [`RefUnwindSafe`](std::panic::RefUnwindSafe)
/// because of its interior mutability, so the block is wrapped in
/// [`AssertUnwindSafe`](std::panic::AssertUnwindSafe). Tests must not touch the value again after
/// the panic.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
