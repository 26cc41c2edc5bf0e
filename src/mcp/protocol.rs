//! MCP Protocol Types (JSON-RPC 2.0)
//!
//! Wire types for the Model Context Protocol: the JSON-RPC 2.0 envelopes
//! plus the MCP entities this server serves (tools, resources, prompts,
//! text content blocks).
//!
//! # Protocol Specification
//!
//! - JSON-RPC 2.0: <https://www.jsonrpc.org/specification>
//! - MCP Spec: <https://modelcontextprotocol.io/specification/2024-11-05>
//!
//! This layer only serializes and deserializes. Framing and I/O
//! (line-delimited JSON over stdio) live in the server layer.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server implements
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A JSON-RPC 2.0 request identifier
///
/// Clients may use numbers or strings; the server must echo the id back
/// verbatim in the matching response, whichever form it arrived in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id (most clients count up from 0 or 1)
    Number(i64),

    /// String id
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A JSON-RPC 2.0 request message
///
/// Everything a client sends arrives as one of these, one JSON object
/// per line. A request carrying no `id` is a notification and must not
/// be answered. On the wire:
///
/// ```json
/// {"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"execute_command","arguments":{"command":"id"}}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,

    /// Request identifier (absent for notifications)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// Method name to invoke
    pub method: String,

    /// Method parameters, shape depending on the method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl McpRequest {
    /// Create an id-bearing request; the id comes back in the response
    pub fn new(
        id: impl Into<RequestId>,
        method: impl Into<String>,
        params: Option<serde_json::Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// Create a notification (a request without an id; never answered)
    pub fn notification(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: method.into(),
            params: None,
        }
    }

    /// Check whether this request is a notification
    pub fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

/// A JSON-RPC 2.0 response message
///
/// Exactly one response leaves for every id-bearing request, carrying
/// either a `result` or an `error`, never both. The id serializes as
/// `null` only when the request id could not be read at all (a parse
/// error), which is why it is not skipped when absent. On the wire,
/// success and failure look like:
///
/// ```json
/// {"jsonrpc":"2.0","id":1,"result":{"content":[{"type":"text","text":"..."}],"isError":false}}
/// {"jsonrpc":"2.0","id":2,"error":{"code":-32602,"message":"Unknown tool: nikto"}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpResponse {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,

    /// Request identifier this response answers (`null` for parse errors)
    pub id: Option<RequestId>,

    /// Result payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error object, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    /// Answer `id` with a result payload
    pub fn ok(id: RequestId, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Answer with an error; `id` is `None` only for parse failures
    pub fn err(id: Option<RequestId>, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Whether this response carries a result and no error
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    /// Split into the result, or the error when unsuccessful
    pub fn into_result(self) -> Result<serde_json::Value, McpError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(error),
            _ => Err(McpError::internal_error(
                "Invalid response: both result and error present",
            )),
        }
    }
}

/// A JSON-RPC 2.0 error object
///
/// Errors follow the JSON-RPC 2.0 specification with MCP-specific extensions.
/// Protocol failures only; tool-level failures travel as in-band text
/// results, never as these objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpError {
    /// JSON-RPC defined or MCP-specific error code
    pub code: i32,

    /// Human-readable message
    pub message: String,

    /// Optional extra error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl McpError {
    /// Error with an arbitrary code and no data
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Error carrying an extra data payload
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    // JSON-RPC reserved codes
    /// -32700: the line was not valid JSON
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(-32700, message)
    }

    /// -32600: valid JSON, but not a request object
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(-32600, message)
    }

    /// -32601: no handler for this method name
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// -32602: parameters missing or malformed
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }

    /// -32603: server-side fault (serialization and the like)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }

    // Implementation-defined range
    /// -32000: MCP server error
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(-32000, message)
    }
}

impl std::fmt::Display for McpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for McpError {}

/// MCP method identifiers
///
/// The subset of standard MCP methods this server answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpMethod {
    /// Handshake; answered statelessly
    Initialize,

    /// Client's handshake acknowledgement (a notification)
    Initialized,

    /// Liveness probe
    Ping,

    /// Tool catalogue listing
    ToolsList,

    /// Tool invocation
    ToolsCall,

    /// Resource catalogue listing
    ResourcesList,

    /// Resource contents fetch
    ResourcesRead,

    /// Prompt catalogue listing
    PromptsList,

    /// Prompt rendering
    PromptsGet,

    /// Anything unrecognized; answered with method-not-found
    Custom(String),
}

impl McpMethod {
    /// The method name as it appears on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::Initialized => "notifications/initialized",
            Self::Ping => "ping",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::ResourcesList => "resources/list",
            Self::ResourcesRead => "resources/read",
            Self::PromptsList => "prompts/list",
            Self::PromptsGet => "prompts/get",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl From<String> for McpMethod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "initialize" => Self::Initialize,
            "notifications/initialized" => Self::Initialized,
            "ping" => Self::Ping,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            "resources/list" => Self::ResourcesList,
            "resources/read" => Self::ResourcesRead,
            "prompts/list" => Self::PromptsList,
            "prompts/get" => Self::PromptsGet,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for McpMethod {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

/// Initialization parameters sent by the client
///
/// All fields are tolerated as absent; the server only logs them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializeParams {
    /// Client protocol version
    #[serde(rename = "protocolVersion", default)]
    pub protocol_version: String,

    /// Client capabilities
    #[serde(default)]
    pub capabilities: ClientCapabilities,

    /// Client information
    #[serde(rename = "clientInfo", default)]
    pub client_info: ClientInfo,
}

/// Capabilities a client announces in initialize; logged, never acted on
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientCapabilities {
    /// Sampling support, object or absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<serde_json::Value>,

    /// Experimental feature flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<serde_json::Value>,
}

/// Client identification from the initialize params
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client name
    #[serde(default)]
    pub name: String,

    /// Client version
    #[serde(default)]
    pub version: String,
}

/// The initialize result this server returns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerCapabilities {
    /// Protocol revision the server speaks
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,

    /// Capability object: which surfaces exist (tools, resources, prompts)
    pub capabilities: serde_json::Value,

    /// How the server identifies itself
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server identity inside the initialize result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Name reported to the client
    pub name: String,

    /// Crate version reported to the client
    pub version: String,
}

/// One catalogue entry advertised over tools/list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    /// Unique tool name
    pub name: String,

    /// What the tool does, written for the calling agent
    pub description: String,

    /// JSON Schema for the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Decoded params of a tools/call request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCallParams {
    /// Which tool to invoke
    pub name: String,

    /// Arguments object; defaults to `{}` when the client omits it
    #[serde(default = "empty_arguments")]
    pub arguments: serde_json::Value,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::json!({})
}

/// A text content block inside a tool or prompt result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextContent {
    /// Content discriminator (always "text")
    #[serde(rename = "type")]
    pub content_type: String,

    /// The text payload
    pub text: String,
}

impl TextContent {
    /// Create a text content block
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// The result of a tools/call invocation
///
/// Tool failures (bad arguments, blocked commands, timeouts) ride in-band
/// here with `is_error` set; they are never JSON-RPC errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCallResult {
    /// Ordered output blocks
    pub content: Vec<TextContent>,

    /// Whether the tool reported a failure
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Wrap rendered text blocks as a successful tool result
    pub fn text(blocks: Vec<String>) -> Self {
        Self {
            content: blocks.into_iter().map(TextContent::new).collect(),
            is_error: false,
        }
    }

    /// Wrap a message as a failed tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(message)],
            is_error: true,
        }
    }
}

/// Resource descriptor (resources/list entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// Resource URI
    pub uri: String,

    /// Human-readable name
    pub name: String,

    /// Resource description
    pub description: String,

    /// MIME type of the resource contents
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One chunk of a read resource (resources/read entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceContents {
    /// URI the contents belong to
    pub uri: String,

    /// MIME type of `text`
    #[serde(rename = "mimeType")]
    pub mime_type: String,

    /// The resource text
    pub text: String,
}

/// Prompt descriptor (prompts/list entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    /// Prompt name (unique identifier)
    pub name: String,

    /// Prompt description
    pub description: String,

    /// Arguments the prompt accepts
    pub arguments: Vec<PromptArgument>,
}

/// A single prompt argument descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptArgument {
    /// Argument name
    pub name: String,

    /// Argument description
    pub description: String,

    /// Whether the argument must be supplied
    pub required: bool,
}

/// One message of a rendered prompt (prompts/get entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptMessage {
    /// Message role ("user" or "assistant")
    pub role: String,

    /// Message content
    pub content: TextContent,
}

impl PromptMessage {
    /// Create a user-role prompt message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: TextContent::new(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_request() {
        let req = McpRequest::new(9, "resources/list", None);
        let json = serde_json::to_string(&req).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":9"));
        assert!(json.contains("\"method\":\"resources/list\""));
        assert!(!json.contains("\"params\""), "absent params must be skipped");
    }

    #[test]
    fn test_deserialize_request() {
        let req: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).unwrap();

        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.id, Some(RequestId::Number(1)));
        assert_eq!(req.method, "tools/list");
        assert!(req.params.is_none());
        assert!(!req.is_notification());
    }

    #[test]
    fn test_deserialize_request_string_id() {
        let json = r#"{"jsonrpc":"2.0","id":"abc-1","method":"ping"}"#;
        let req: McpRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.id, Some(RequestId::String("abc-1".to_string())));
    }

    #[test]
    fn test_deserialize_notification() {
        let json = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        let req: McpRequest = serde_json::from_str(json).unwrap();

        assert!(req.id.is_none());
        assert!(req.is_notification());
    }

    #[test]
    fn test_request_id_echoes_verbatim() {
        let numeric = McpResponse::ok(RequestId::Number(7), serde_json::json!({}));
        let json = serde_json::to_string(&numeric).unwrap();
        assert!(json.contains("\"id\":7"));

        let string = McpResponse::ok(RequestId::from("seven"), serde_json::json!({}));
        let json = serde_json::to_string(&string).unwrap();
        assert!(json.contains("\"id\":\"seven\""));
    }

    #[test]
    fn test_null_id_on_parse_error_response() {
        let resp = McpResponse::err(None, McpError::parse_error("bad json"));
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"id\":null"));
        assert!(json.contains("-32700"));
    }

    #[test]
    fn test_serialize_response_success() {
        let resp = McpResponse::ok(
            RequestId::Number(3),
            serde_json::json!({"content": [], "isError": false}),
        );
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":3"));
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_serialize_response_error() {
        let resp = McpResponse::err(
            Some(RequestId::Number(3)),
            McpError::invalid_params("Unknown tool: nikto"),
        );
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":3"));
        assert!(json.contains("\"error\""));
        assert!(json.contains("Unknown tool: nikto"));
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn test_response_is_success() {
        let ok = McpResponse::ok(RequestId::Number(5), serde_json::json!({"tools": []}));
        assert!(ok.is_success());

        let err = McpResponse::err(
            Some(RequestId::Number(5)),
            McpError::internal_error("serialization failed"),
        );
        assert!(!err.is_success());
    }

    #[test]
    fn test_response_into_result() {
        let payload = serde_json::json!({"prompts": []});
        let ok = McpResponse::ok(RequestId::Number(2), payload.clone());
        assert_eq!(ok.into_result().unwrap(), payload);

        let failure = McpError::invalid_params("Missing params");
        let err = McpResponse::err(Some(RequestId::Number(2)), failure.clone());
        assert_eq!(err.into_result().unwrap_err(), failure);
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (McpError::parse_error("line was not JSON"), -32700),
            (McpError::invalid_request("not a request object"), -32600),
            (McpError::method_not_found("tools/destroy"), -32601),
            (McpError::invalid_params("Missing params"), -32602),
            (McpError::internal_error("result did not serialize"), -32603),
            (McpError::server_error("runner gave out"), -32000),
        ];

        for (err, code) in cases {
            assert_eq!(err.code, code, "wrong code for {:?}", err.message);
        }
    }

    #[test]
    fn test_mcp_method_conversion() {
        let wire_names = [
            (McpMethod::Initialize, "initialize"),
            (McpMethod::Initialized, "notifications/initialized"),
            (McpMethod::Ping, "ping"),
            (McpMethod::ToolsList, "tools/list"),
            (McpMethod::ToolsCall, "tools/call"),
            (McpMethod::ResourcesList, "resources/list"),
            (McpMethod::ResourcesRead, "resources/read"),
            (McpMethod::PromptsList, "prompts/list"),
            (McpMethod::PromptsGet, "prompts/get"),
        ];

        for (method, name) in wire_names {
            assert_eq!(method.as_str(), name);
            assert_eq!(McpMethod::from(name), method);
        }

        let custom = McpMethod::from("vendor/extension");
        assert_eq!(custom, McpMethod::Custom("vendor/extension".to_string()));
        assert_eq!(custom.as_str(), "vendor/extension");
    }

    #[test]
    fn test_tool_serialization() {
        let tool = Tool {
            name: "crack_hash".to_string(),
            description: "Attempt to crack a hash".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {"hash": {"type": "string"}},
                "required": ["hash"],
            }),
        };

        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("\"name\":\"crack_hash\""));
        assert!(json.contains("\"inputSchema\""));
        assert!(!json.contains("input_schema"));
    }

    #[test]
    fn test_tool_call_params_default_arguments() {
        let json = r#"{"name":"execute_command"}"#;
        let params: ToolCallParams = serde_json::from_str(json).unwrap();

        assert_eq!(params.name, "execute_command");
        assert_eq!(params.arguments, serde_json::json!({}));
    }

    #[test]
    fn test_round_trip_request() {
        let original = McpRequest::new(
            42,
            "tools/call",
            Some(serde_json::json!({
                "name": "crack_hash",
                "arguments": {"hash": "5f4dcc3b5aa765d61d8327deb882cf99", "hash_type": "md5"},
            })),
        );

        let json = serde_json::to_string(&original).unwrap();
        let decoded: McpRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_initialize_params_lenient() {
        let params: InitializeParams = serde_json::from_str("{}").unwrap();
        assert!(params.protocol_version.is_empty());

        let full: InitializeParams = serde_json::from_str(
            r#"{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"c","version":"1"}}"#,
        )
        .unwrap();
        assert_eq!(full.protocol_version, "2024-11-05");
        assert_eq!(full.client_info.name, "c");
    }

    #[test]
    fn test_text_content_shape() {
        let content = TextContent::new("hello");
        let json = serde_json::to_string(&content).unwrap();

        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"text\":\"hello\""));
    }

    #[test]
    fn test_tool_call_result_shapes() {
        let ok = ToolCallResult::text(vec!["one".to_string(), "two".to_string()]);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"isError\":false"));
        assert_eq!(ok.content.len(), 2);

        let err = ToolCallResult::error("Error: invalid arguments");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"isError\":true"));
    }

    #[test]
    fn test_resource_serialization() {
        let resource = Resource {
            uri: "prompt://kali-ctf-solver/instructions".to_string(),
            name: "CTF Solver Instructions".to_string(),
            description: "Instructions for solving CTF challenges".to_string(),
            mime_type: "text/markdown".to_string(),
        };

        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"mimeType\":\"text/markdown\""));
        assert!(json.contains("prompt://kali-ctf-solver/instructions"));
    }

    #[test]
    fn test_prompt_message_user() {
        let msg = PromptMessage::user("solve it");
        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"type\":\"text\""));
    }

    #[test]
    fn test_error_with_data() {
        let data = serde_json::json!({"pattern": "rm -rf /"});
        let err = McpError::with_data(-32000, "Command blocked", data.clone());

        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "Command blocked");
        assert_eq!(err.data, Some(data));
    }

    #[test]
    fn test_response_into_result_invalid() {
        // A response carrying both result and error is malformed; into_result
        // must refuse it rather than pick a side.
        let malformed = McpResponse {
            jsonrpc: "2.0".to_string(),
            id: Some(RequestId::Number(8)),
            result: Some(serde_json::json!({"content": []})),
            error: Some(McpError::internal_error("leftover")),
        };

        let err = malformed.into_result().unwrap_err();
        assert_eq!(err.code, -32603);
        assert!(err.message.contains("Invalid response"));
    }

    #[test]
    fn test_error_new() {
        let err = McpError::new(-32050, "Timed out after 300 seconds");
        assert_eq!(err.code, -32050);
        assert_eq!(err.message, "Timed out after 300 seconds");
        assert!(err.data.is_none());
    }
}
