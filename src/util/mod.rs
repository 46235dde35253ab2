// Utility module.
// Civil-date handling and small formatting/arithmetic helpers shared across the app.

pub mod dates;
pub mod format;
pub mod math;

pub use dates::{
    CivilDateTime, civil_token, date_diff, date_format, date_now, date_offset, date_parse,
    date_today, is_leap_year, month_days,
};
pub use format::{
    PriceRange, compare_version, computed_discount, currency, currency_cents, format_float,
    map_key, number_to_string, parse_discount,
};
