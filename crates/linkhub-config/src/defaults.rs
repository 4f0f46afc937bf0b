//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `linkhub_core::defaults`.

use linkhub_core::defaults;

/// Generate default value functions that forward to linkhub_core::defaults constants.
macro_rules! default_fns {
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

/// Generate default value functions that return Vec<String> from &[&str] constants.
macro_rules! default_list_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> Vec<String> {
                defaults::$const_name.iter().map(|s| s.to_string()).collect()
            }
        )*
    };
}

default_fns! {
    default_ctr_precision => DEFAULT_CTR_PRECISION: u8,
    max_ctr_precision     => MAX_CTR_PRECISION: u8,
}

default_string_fns! {
    default_unknown_country => DEFAULT_UNKNOWN_COUNTRY,
    default_clock           => DEFAULT_CLOCK,
}

default_list_fns! {
    default_mobile_keywords => DEFAULT_MOBILE_KEYWORDS,
    default_bot_keywords    => DEFAULT_BOT_KEYWORDS,
}
