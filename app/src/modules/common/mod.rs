pub mod error;
pub mod extractors;
pub mod multipart_form_data;
pub mod responses;
pub mod validators;
