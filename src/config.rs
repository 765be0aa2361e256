use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use crate::errors::PageError;
use crate::models::InputType;

const DEFAULT_PLACEHOLDER_THUMBNAIL: &str =
    "https://placehold.co/480x360/E0E0E0/6C757D?text=No+Thumbnail";

/// Text shown by the two page controllers.
#[derive(Debug, Clone)]
pub struct UiCopy {
    pub video_placeholder: String,
    pub channel_placeholder: String,
    pub video_submit_label: String,
    pub channel_submit_label: String,
    pub load_more_label: String,
    pub loading_label: String,
    pub analyze_button_label: String,
    pub thumbnail_alt: String,
    pub load_error_prefix: String,
}

impl Default for UiCopy {
    fn default() -> Self {
        UiCopy {
            video_placeholder: "Enter a video link, e.g. https://www.youtube.com/watch?v=xxxxxxxxxxx".to_string(),
            channel_placeholder: "Enter a channel link, e.g. https://youtube.com/@channel".to_string(),
            video_submit_label: "Analyze comments".to_string(),
            channel_submit_label: "Show channel videos".to_string(),
            load_more_label: "Load more".to_string(),
            loading_label: "Loading...".to_string(),
            analyze_button_label: "Analyze comments".to_string(),
            thumbnail_alt: "Video thumbnail".to_string(),
            load_error_prefix: "Error loading more videos".to_string(),
        }
    }
}

impl UiCopy {
    pub fn placeholder(&self, mode: InputType) -> &str {
        match mode {
            InputType::Video => &self.video_placeholder,
            InputType::Channel => &self.channel_placeholder,
        }
    }

    pub fn submit_label(&self, mode: InputType) -> &str {
        match mode {
            InputType::Video => &self.video_submit_label,
            InputType::Channel => &self.channel_submit_label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Origin the relative endpoints are resolved against, without a trailing slash.
    pub base_url: String,
    pub analyze_action: String,
    /// Class that makes the loading overlay visible.
    pub overlay_class: String,
    pub placeholder_thumbnail: String,
    pub copy: UiCopy,
    pub log: LogConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            base_url: "http://127.0.0.1:8000".to_string(),
            analyze_action: "/analyze".to_string(),
            overlay_class: "show".to_string(),
            placeholder_thumbnail: DEFAULT_PLACEHOLDER_THUMBNAIL.to_string(),
            copy: UiCopy::default(),
            log: LogConfig::default(),
        }
    }
}

impl PageConfig {
    /// Defaults overridden by `PAGES_BASE_URL`, `PAGES_LOG_FORMAT` and
    /// `PAGES_LOG_DIR`, reading `.env` first if there is one.
    pub fn from_env() -> Result<Self, PageError> {
        Self::from_dotenv(dotenvy::dotenv_iter().ok())
    }

    /// Like `from_env`, but with an explicit env file that must exist.
    /// Process variables still take precedence over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| PageError::Config(format!("{}: {e}", path.display())))?;
        Self::from_dotenv(Some(iter))
    }

    fn from_dotenv(file: Option<dotenvy::Iter<File>>) -> Result<Self, PageError> {
        let mut file_vars = HashMap::new();
        for item in file.into_iter().flatten() {
            let (key, value) = item.map_err(|e| PageError::Config(format!(".env: {e}")))?;
            file_vars.insert(key, value);
        }
        Self::from_vars(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PageError> {
        let mut config = PageConfig::default();

        if let Some(base_url) = lookup("PAGES_BASE_URL") {
            let parsed = reqwest::Url::parse(&base_url)
                .map_err(|e| PageError::Config(format!("PAGES_BASE_URL {base_url:?}: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(PageError::Config(format!(
                    "PAGES_BASE_URL must be http or https, got {}",
                    parsed.scheme()
                )));
            }
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(format) = lookup("PAGES_LOG_FORMAT") {
            config.log.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "" => LogFormat::Pretty,
                other => return Err(PageError::Config(format!("unknown PAGES_LOG_FORMAT {other:?}"))),
            };
        }

        config.log.directory = lookup("PAGES_LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
