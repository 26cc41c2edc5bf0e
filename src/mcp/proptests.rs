//! Property-Based Tests for the MCP Server
//!
//! Proptest invariants over the protocol layer and the dispatcher:
//! serialization never loses or reshapes a message (including the
//! number-or-string form of request ids), every id-bearing request is
//! answered exactly once with its own id, notifications are never
//! answered, and the standard error constructors keep to the codes
//! JSON-RPC reserves for them.

use proptest::prelude::*;
use serde_json::Value;

use crate::config::Config;
use crate::mcp::protocol::{
    McpError, McpMethod, McpRequest, McpResponse, RequestId, ToolCallResult,
};
use crate::mcp::server::McpServer;

// Scalars and small arrays give enough shape variety for params fields
fn arb_json_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n: i64| Value::from(n)),
        "[ -~]{0,24}".prop_map(Value::String),
    ];
    prop_oneof![
        scalar.clone(),
        prop::collection::vec(scalar, 0..4).prop_map(Value::Array),
    ]
}

// Request ids in both wire forms
fn arb_request_id() -> impl Strategy<Value = RequestId> {
    prop_oneof![
        any::<i64>().prop_map(RequestId::Number),
        "[a-zA-Z0-9_-]{1,32}".prop_map(RequestId::String),
    ]
}

// ============================================================================
// Property 1: Serialization Round-Trips
// ============================================================================

proptest! {
    /// Requests survive the wire whatever form the id takes
    #[test]
    fn prop_requests_round_trip(
        id in arb_request_id(),
        method in "[a-z_/]+",
        params in prop::option::of(arb_json_value())
    ) {
        let original = McpRequest::new(id, &method, params);
        let line = serde_json::to_string(&original).unwrap();
        let back: McpRequest = serde_json::from_str(&line).unwrap();

        prop_assert_eq!(back, original);
    }

    /// The untagged id encoding never collapses numbers and strings
    #[test]
    fn prop_request_id_form_is_preserved(n in any::<i64>()) {
        let as_number = serde_json::to_string(&RequestId::Number(n)).unwrap();
        let as_string = serde_json::to_string(&RequestId::String(n.to_string())).unwrap();

        prop_assert_ne!(&as_number, &as_string);
        prop_assert_eq!(
            serde_json::from_str::<RequestId>(&as_number).unwrap(),
            RequestId::Number(n)
        );
        prop_assert_eq!(
            serde_json::from_str::<RequestId>(&as_string).unwrap(),
            RequestId::String(n.to_string())
        );
    }

    /// Responses survive the wire in both success and error shapes
    #[test]
    fn prop_responses_round_trip(
        id in arb_request_id(),
        result in prop::option::of(arb_json_value()),
        error_code in -32700i32..0
    ) {
        let original = match result {
            Some(payload) => McpResponse::ok(id, payload),
            None => McpResponse::err(Some(id), McpError::new(error_code, "went sideways")),
        };

        let line = serde_json::to_string(&original).unwrap();
        let back: McpResponse = serde_json::from_str(&line).unwrap();

        prop_assert_eq!(back, original);
    }

    /// Method names map to McpMethod and back without loss
    #[test]
    fn prop_method_name_mapping_roundtrip(method in "[a-z_/]+") {
        let mapped = McpMethod::from(method.as_str());
        prop_assert_eq!(mapped.as_str(), method.as_str());
    }
}

// ============================================================================
// Property 2: Dispatch Invariants
// ============================================================================

proptest! {
    /// Every id-bearing request gets exactly one response with the same id,
    /// whatever the method was
    #[test]
    fn prop_response_id_matches_request_id(
        id in arb_request_id(),
        method in "[a-z]+(/[a-z]+)?"
    ) {
        prop_assume!(!method.starts_with("notifications/"));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let server = McpServer::new(&Config::default());
        let request = McpRequest::new(id.clone(), &method, None);
        let line = serde_json::to_string(&request).unwrap();

        let response = runtime.block_on(server.handle_line(&line));
        let response = response.expect("id-bearing requests are always answered");
        prop_assert_eq!(response.id, Some(id));
    }

    /// Requests without an id are notifications and never answered
    #[test]
    fn prop_notifications_never_answered(method in "[a-z]+(/[a-z]+)?") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let server = McpServer::new(&Config::default());
        let request = McpRequest::notification(&method);
        let line = serde_json::to_string(&request).unwrap();

        let response = runtime.block_on(server.handle_line(&line));
        prop_assert!(response.is_none());
    }
}

// ============================================================================
// Property 3: Error Invariants
// ============================================================================

proptest! {
    /// The named constructors keep to their reserved codes
    #[test]
    fn prop_error_constructors_use_reserved_codes(message in "[a-z_]+") {
        let reserved: [(McpError, i32); 6] = [
            (McpError::parse_error(&message), -32700),
            (McpError::invalid_request(&message), -32600),
            (McpError::method_not_found(&message), -32601),
            (McpError::invalid_params(&message), -32602),
            (McpError::internal_error(&message), -32603),
            (McpError::server_error(&message), -32000),
        ];

        for (err, code) in reserved {
            prop_assert_eq!(err.code, code);
            prop_assert_eq!(&err.message, &message);
        }
    }

    /// Errors survive the wire with code, message, and data intact
    #[test]
    fn prop_errors_round_trip(
        code in -32700i32..0,
        message in "[a-zA-Z ]+",
        data in prop::option::of(arb_json_value())
    ) {
        let original = match data {
            Some(d) => McpError::with_data(code, &message, d),
            None => McpError::new(code, &message),
        };

        let line = serde_json::to_string(&original).unwrap();
        let back: McpError = serde_json::from_str(&line).unwrap();

        prop_assert_eq!(back, original);
    }
}

// ============================================================================
// Property 4: Tool Result Invariants
// ============================================================================

proptest! {
    /// Text results keep every block, in order, and never carry the error flag
    #[test]
    fn prop_text_results_preserve_blocks(
        blocks in prop::collection::vec(".*", 0..5)
    ) {
        let result = ToolCallResult::text(blocks.clone());

        prop_assert!(!result.is_error);
        prop_assert_eq!(result.content.len(), blocks.len());
        for (content, block) in result.content.iter().zip(&blocks) {
            prop_assert_eq!(&content.text, block);
        }
    }

    /// Error results always carry the flag and exactly one block
    #[test]
    fn prop_error_results_flagged(message in ".*") {
        let result = ToolCallResult::error(message.clone());

        prop_assert!(result.is_error);
        prop_assert_eq!(result.content.len(), 1);
        prop_assert_eq!(&result.content[0].text, &message);
    }
}
