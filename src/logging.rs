// Not every macro is used in every configuration. With `logging` disabled,
// the arguments aren't even type checked, so they cost nothing.
#![allow(unused_macros)]

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! error {
    ($($tt:tt)*) => { log!(log::error!(target: "jiff_pattern", $($tt)*)) }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!(target: "jiff_pattern", $($tt)*)) }
}

macro_rules! info {
    ($($tt:tt)*) => { log!(log::info!(target: "jiff_pattern", $($tt)*)) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!(target: "jiff_pattern", $($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!(target: "jiff_pattern", $($tt)*)) }
}
