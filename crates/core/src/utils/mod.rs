pub mod numeric;
pub mod time_utils;

pub use numeric::round2;
pub use time_utils::inclusive_day_count;
