use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ResultEntity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Echo of the submitted query; older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ResultEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildResponse {
    pub status: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClusterId;

    #[test]
    fn missing_or_null_results_decode_as_empty() {
        let missing: SearchResponse = serde_json::from_str(r#"{"query":"x"}"#).expect("missing");
        assert!(missing.results.is_empty());
        assert_eq!(missing.query.as_deref(), Some("x"));

        let null: SearchResponse = serde_json::from_str(r#"{"results":null}"#).expect("null");
        assert!(null.results.is_empty());
    }

    #[test]
    fn decodes_backend_search_payload_in_order() {
        let body = r#"{"query":"stock market","results":[
            {"rank":1,"title":"Markets rally","description":"...","score":0.92,"cluster":3},
            {"rank":2,"title":"Bonds slip","description":"","score":0.41,"cluster":3}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(body).expect("decode");
        let ranks: Vec<u32> = response.results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(response.results[0].cluster, ClusterId(3));
    }

    #[test]
    fn rebuild_response_requires_status() {
        assert!(serde_json::from_str::<RebuildResponse>("{}").is_err());
        let ok: RebuildResponse =
            serde_json::from_str(r#"{"status":"rebuild started"}"#).expect("decode");
        assert_eq!(ok.status, "rebuild started");
    }

    #[test]
    fn search_request_body_matches_wire_format() {
        let body = serde_json::to_string(&SearchRequest {
            query: " padded ".into(),
        })
        .expect("encode");
        assert_eq!(body, r#"{"query":" padded "}"#);
    }
}
