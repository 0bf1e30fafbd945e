//! Logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled, to the `log` facade when
//! the `log` feature is enabled, and compile to nothing otherwise. Format strings
//! must stay within the subset both backends accept (plain `{}` placeholders).

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        log::debug!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = || {
                let _ = core::format_args!($($arg)*);
            };
        }
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        log::info!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = || {
                let _ = core::format_args!($($arg)*);
            };
        }
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        log::warn!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            let _ = || {
                let _ = core::format_args!($($arg)*);
            };
        }
    }};
}
