//! Configuration domain

mod app_config;

pub use app_config::{
    AppConfig, ProgressConfig, DEFAULT_APP_NAME, DEFAULT_BACKEND, DEFAULT_MESSAGE, DEFAULT_TITLE,
};
