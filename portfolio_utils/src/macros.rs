/// Asserts that an expression matches a pattern, optionally with a guard that
/// is evaluated against a reference to the value.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match $expr {
            $pat => (),
            other => ::core::panic!(
                "assertion failed: {other:?} did not match pattern `{}`",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let value = $expr;
        match &value {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only needed by the guard")]
            $pat => ::core::panic!(
                "assertion failed: {value:?} did not satisfy `{}`",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "assertion failed: {value:?} did not match pattern `{}`",
                ::core::stringify!($pat)
            ),
        }
    }};
}
