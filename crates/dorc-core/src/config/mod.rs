//! Configuration loading and management

mod loader;

pub use loader::{
    read_token, CleanerConfig, DEFAULT_API_URL, DEFAULT_KEEP_TAGS, DEFAULT_MIN_AGE_DAYS,
    DEFAULT_PROTECTED, TOKEN_ENV,
};
