use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::errors::PageError;
use crate::token::PageToken;

#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Video,
    Channel,
}

impl InputType {
    pub const ALL: [InputType; 2] = [InputType::Video, InputType::Channel];

    /// Parse the `value` attribute of an `input_type` radio.
    pub fn from_radio_value(value: &str) -> Result<Self, PageError> {
        match value {
            "video" => Ok(InputType::Video),
            "channel" => Ok(InputType::Channel),
            other => Err(PageError::UnknownInputType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Video => "video",
            InputType::Channel => "channel",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub video_type: String,
}

impl Video {
    /// Build a record from whatever the backend put in the array.
    /// Missing fields render as empty text rather than failing the page.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).map(stringify).unwrap_or_default();
        Video {
            title: field("title"),
            video_url: field("video_url"),
            thumbnail: field("thumbnail"),
            video_type: field("video_type"),
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Body of `GET /load_more_channel_videos`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMoreResponse {
    pub videos: Vec<Video>,
    pub next_page_token: PageToken,
}

impl LoadMoreResponse {
    pub fn from_json(body: &Value) -> Self {
        let videos = body
            .get("all_videos")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Video::from_value).collect())
            .unwrap_or_default();

        let next_page_token = match body.get("next_page_token") {
            Some(Value::String(s)) => PageToken::normalize(Some(s)),
            Some(Value::Null) | None => PageToken::default(),
            Some(other) => PageToken::normalize(Some(&other.to_string())),
        };

        LoadMoreResponse { videos, next_page_token }
    }

    pub fn parse(body: &str) -> Result<Self, PageError> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_json(&value))
    }
}

/// Channel information the server renders into the video container's
/// `data-*` attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelContext {
    pub channel_id: String,
    pub channel_url: String,
    pub next_page_token: PageToken,
}

impl ChannelContext {
    pub const CHANNEL_ID_KEY: &'static str = "channel-id";
    pub const CHANNEL_URL_KEY: &'static str = "channel-url";
    pub const NEXT_PAGE_TOKEN_KEY: &'static str = "next-page-token";

    /// Keys are the attribute names without the `data-` prefix.
    pub fn from_dataset(dataset: &HashMap<String, String>) -> Self {
        let get = |key: &str| dataset.get(key).cloned().unwrap_or_default();
        ChannelContext {
            channel_id: get(Self::CHANNEL_ID_KEY),
            channel_url: get(Self::CHANNEL_URL_KEY),
            next_page_token: PageToken::normalize(
                dataset.get(Self::NEXT_PAGE_TOKEN_KEY).map(String::as_str),
            ),
        }
    }
}
