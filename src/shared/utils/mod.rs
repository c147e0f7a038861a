pub mod email_validator;
pub mod slug;
pub mod timestamp;
