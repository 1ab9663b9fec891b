// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// User-facing alert: logged at ERROR and forwarded to an
/// `Option<&mut dyn Progress>` sink when one is attached.
#[macro_export]
macro_rules! alert {
    ($progress:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::loge!("Alert: {}", msg);
        if let Some(p) = $progress.as_deref_mut() {
            p.alert(&msg);
        }
    }};
}
