pub mod char_range;
pub mod constants;
