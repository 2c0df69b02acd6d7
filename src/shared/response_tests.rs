use crate::cql::parser::query::parse_query;
use crate::engine::execute;
use crate::engine::limits::ExecutionLimits;
use crate::shared::error::CogError;
use crate::shared::response::{query_error, query_ok, stream_error};
use crate::test_helpers::Factory;
use serde_json::json;

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn test_query_ok_envelope_shape() {
        let snapshot = Factory::snapshot().with_cells(2).create();
        let ast = parse_query("FROM cells AGGREGATE count() RENDER text").unwrap();
        let result = execute(&ast, &snapshot, &ExecutionLimits::default()).unwrap();

        let envelope = query_ok(&ast, &result);

        assert_eq!(envelope["ok"], json!(true));
        assert_eq!(envelope["cql"]["version"], "1.0");
        assert_eq!(envelope["cql"]["ast"]["from"], "cells");
        assert_eq!(envelope["crm"]["layers_used"][0], "RAW");
        assert_eq!(envelope["result"]["format"], "text");
        assert_eq!(envelope["result"]["data"]["count"], json!(2));
        assert!(envelope["result"]["text"].as_str().unwrap().len() > 0);
    }

    #[test]
    fn test_render_format_defaults_to_json() {
        let snapshot = Factory::snapshot().create();
        let ast = parse_query("FROM cells").unwrap();
        let result = execute(&ast, &snapshot, &ExecutionLimits::default()).unwrap();

        let envelope = query_ok(&ast, &result);
        assert_eq!(envelope["result"]["format"], "json");
    }

    #[test]
    fn test_query_error_envelope() {
        let envelope = query_error(&CogError::Parse("bad clause".to_string()));

        assert_eq!(envelope["ok"], json!(false));
        assert_eq!(envelope["error"]["code"], "CQL_PARSE_ERROR");
        assert_eq!(envelope["error"]["message"], "bad clause");
    }

    #[test]
    fn test_internal_error_message_is_suppressed() {
        let envelope = query_error(&CogError::Internal("connection pool exploded".to_string()));

        assert_eq!(envelope["error"]["code"], "INTERNAL_COG_ERROR");
        let message = envelope["error"]["message"].as_str().unwrap();
        assert!(!message.contains("exploded"));
    }

    #[test]
    fn test_stream_error_shape() {
        let envelope = stream_error(&CogError::InvalidWindow(45));

        assert_eq!(envelope["error"]["code"], "INVALID_WINDOW");
        assert!(
            envelope["error"]["message"]
                .as_str()
                .unwrap()
                .contains("45")
        );
    }
}
