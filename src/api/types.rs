use urlencoding::encode;
use crate::token::PageToken;

pub const LOAD_MORE_PATH: &str = "/load_more_channel_videos";

/// One "load more" request: which channel, and where to resume.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub channel_id: String,
    pub page_token: PageToken,
}

impl PageRequest {
    /// Path and query, with both parameters percent-encoded.
    pub fn path(&self) -> String {
        format!(
            "{}?channel_id={}&page_token={}",
            LOAD_MORE_PATH,
            encode(&self.channel_id),
            encode(self.page_token.as_str())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_encodes_parameters() {
        let request = PageRequest {
            channel_id: "UC a&b".to_string(),
            page_token: PageToken::normalize(Some("CDIQ/AA=")),
        };
        assert_eq!(
            request.path(),
            "/load_more_channel_videos?channel_id=UC%20a%26b&page_token=CDIQ%2FAA%3D"
        );
    }
}
