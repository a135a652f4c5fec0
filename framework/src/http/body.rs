//! Body decoding for JSON and form-urlencoded payloads

use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::{BodyExt, Limited};
use hyper::body::Body;
use serde::de::DeserializeOwned;

/// Collect a request body, refusing anything larger than `limit` bytes
pub async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, FrameworkError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.downcast_ref::<http_body_util::LengthLimitError>().is_some() {
                FrameworkError::PayloadTooLarge { limit }
            } else {
                FrameworkError::bad_request(format!("Failed to read request body: {}", e))
            }
        })
}

/// Parse bytes as JSON into the target type
pub fn parse_json<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, FrameworkError> {
    serde_json::from_slice(bytes)
        .map_err(|e| FrameworkError::bad_request(format!("Failed to parse JSON body: {}", e)))
}

/// Parse bytes as form-urlencoded into the target type
pub fn parse_form<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, FrameworkError> {
    serde_urlencoded::from_bytes(bytes)
        .map_err(|e| FrameworkError::bad_request(format!("Failed to parse form body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Draft {
        description: String,
        #[serde(default)]
        completed: Option<bool>,
    }

    #[test]
    fn parses_form_fields() {
        let bytes = Bytes::from_static(b"description=Buy+milk");
        let draft: Draft = parse_form(&bytes).unwrap();
        assert_eq!(draft.description, "Buy milk");
        assert_eq!(draft.completed, None);
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let bytes = Bytes::from_static(b"{\"description\":");
        let err = parse_json::<Draft>(&bytes).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn body_over_limit_is_rejected() {
        let body = Full::new(Bytes::from(vec![0u8; 11]));

        let err = collect_body(body, 10).await.unwrap_err();

        assert!(matches!(err, FrameworkError::PayloadTooLarge { limit: 10 }));
        assert_eq!(err.status_code(), 413);
    }

    #[tokio::test]
    async fn body_within_limit_is_collected() {
        let body = Full::new(Bytes::from_static(b"description=Buy+milk"));

        let bytes = collect_body(body, 64).await.unwrap();

        assert_eq!(bytes.as_ref(), b"description=Buy+milk");
    }
}
