//! Configuration sources

mod env_file;

pub use env_file::{
    BACKEND_URL_KEY, DEFAULT_ENV_FILE, ENV_FILE_VAR, EnvFileConfigSource, find_key,
};
