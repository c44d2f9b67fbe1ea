use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub root: PathBuf,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        Self {
            root: PathBuf::from(env::var("MEDIA_ROOT").unwrap_or_else(|_| "storage/media".to_string())),
        }
    }
}
