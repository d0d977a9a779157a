use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// digits only, phone numbers are stored without separators
    pub static ref REGEX_IS_PHONE_NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();
}
