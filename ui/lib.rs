mod time_range_select;

pub use self::time_range_select::*;
