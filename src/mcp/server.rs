//! MCP Server Loop
//!
//! Serves the protocol over stdio: requests arrive one JSON-RPC message per
//! line on stdin, responses leave one per line on stdout, flushed after each
//! write. Notifications are consumed without a reply. EOF on stdin is the
//! shutdown signal.
//!
//! stdout belongs exclusively to the protocol stream; all logging goes to
//! stderr via `tracing`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::mcp::protocol::{
    InitializeParams, McpError, McpMethod, McpRequest, McpResponse, Prompt, PromptArgument,
    PromptMessage, RequestId, Resource, ResourceContents, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolCallResult, PROTOCOL_VERSION,
};
use crate::tools::{catalog, dispatch, DispatchError, ShellExecutor, ToolDefaults, ToolRequest};

/// Name the server reports during the initialize handshake
pub const SERVER_NAME: &str = "kali-ctf-solver";

/// URI of the single instructions resource
pub const INSTRUCTIONS_URI: &str = "prompt://kali-ctf-solver/instructions";

/// Name of the single prompt
pub const PROMPT_NAME: &str = "kali_ctf_solver";

/// The MCP server: owns the command executor and answers protocol requests.
///
/// Each request is handled in isolation; no state accumulates between
/// tool calls.
pub struct McpServer {
    executor: ShellExecutor,
    defaults: ToolDefaults,
    instructions_path: PathBuf,
}

impl McpServer {
    /// Build a server from loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            executor: ShellExecutor::new(),
            defaults: ToolDefaults {
                timeout_secs: config.execution.default_timeout_secs,
                wordlist: config.paths.wordlist.clone(),
            },
            instructions_path: config.instructions_path(),
        }
    }

    /// Serve requests from stdin until EOF
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();
        let mut line = String::with_capacity(4096);

        info!(
            "{} v{} serving MCP (protocol {}) on stdio",
            SERVER_NAME,
            env!("CARGO_PKG_VERSION"),
            PROTOCOL_VERSION
        );

        loop {
            line.clear();
            let bytes_read = reader
                .read_line(&mut line)
                .await
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                info!("stdin closed, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(trimmed).await {
                let payload =
                    serde_json::to_string(&response).context("Failed to serialize response")?;
                debug!("Sending: {}", payload);
                stdout
                    .write_all(payload.as_bytes())
                    .await
                    .context("Failed to write response")?;
                stdout
                    .write_all(b"\n")
                    .await
                    .context("Failed to write response delimiter")?;
                stdout.flush().await.context("Failed to flush stdout")?;
            }
        }

        Ok(())
    }

    /// Handle one raw input line. Returns `None` when the line is a
    /// notification and no reply is owed.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        debug!("Received: {}", line);

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!("Parse error: {}", err);
                return Some(McpResponse::err(None, McpError::parse_error(err.to_string())));
            }
        };

        // Salvage the id before shape-checking so the error answers the
        // request that caused it.
        let id: Option<RequestId> = value
            .get("id")
            .and_then(|raw| serde_json::from_value(raw.clone()).ok());

        let request: McpRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(err) => {
                warn!("Invalid request: {}", err);
                return Some(McpResponse::err(
                    id,
                    McpError::invalid_request(err.to_string()),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Dispatch one parsed request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let id = match (request.id.clone(), request.is_notification()) {
            (Some(id), false) => id,
            _ => {
                debug!("Notification: {}", request.method);
                return None;
            }
        };

        let result = match McpMethod::from(request.method.as_str()) {
            McpMethod::Initialize => self.handle_initialize(request.params),
            McpMethod::Initialized => return None,
            McpMethod::Ping => Ok(json!({})),
            McpMethod::ToolsList => Ok(json!({ "tools": catalog() })),
            McpMethod::ToolsCall => self.handle_tools_call(request.params).await,
            McpMethod::ResourcesList => Ok(self.handle_resources_list()),
            McpMethod::ResourcesRead => self.handle_resources_read(request.params),
            McpMethod::PromptsList => Ok(self.handle_prompts_list()),
            McpMethod::PromptsGet => self.handle_prompts_get(request.params),
            McpMethod::Custom(method) => {
                warn!("Method not found: {}", method);
                Err(McpError::method_not_found(method))
            }
        };

        Some(match result {
            Ok(result) => McpResponse::ok(id, result),
            Err(error) => McpResponse::err(Some(id), error),
        })
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = match params {
            Some(value) => serde_json::from_value(value)
                .map_err(|err| McpError::invalid_params(err.to_string()))?,
            None => InitializeParams::default(),
        };

        info!(
            "Initialize from {} {} (client protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );

        let capabilities = ServerCapabilities {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: json!({
                "tools": {},
                "resources": {},
                "prompts": {},
            }),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        serde_json::to_value(capabilities).map_err(|err| McpError::internal_error(err.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = match params {
            Some(value) => serde_json::from_value(value)
                .map_err(|err| McpError::invalid_params(err.to_string()))?,
            None => return Err(McpError::invalid_params("tools/call requires params")),
        };

        info!("Tool call: {}", params.name);

        let request = match ToolRequest::parse(&params.name, params.arguments) {
            Ok(request) => request,
            Err(err @ DispatchError::UnknownTool(_)) => {
                warn!("{}", err);
                return Err(McpError::invalid_params(err.to_string()));
            }
            // Malformed arguments for a known tool come back in-band,
            // like every other tool failure.
            Err(err) => {
                warn!("{}", err);
                let result = ToolCallResult::error(format!("Error: {}", err));
                return serde_json::to_value(result)
                    .map_err(|err| McpError::internal_error(err.to_string()));
            }
        };

        let blocks = dispatch(&self.executor, request, &self.defaults).await;
        let result = ToolCallResult::text(blocks);
        serde_json::to_value(result).map_err(|err| McpError::internal_error(err.to_string()))
    }

    fn handle_resources_list(&self) -> Value {
        json!({
            "resources": [Resource {
                uri: INSTRUCTIONS_URI.to_string(),
                name: "Kali CTF Solver Instructions".to_string(),
                description: "Instructions for the Kali CTF Solver tool".to_string(),
                mime_type: "text/markdown".to_string(),
            }]
        })
    }

    fn handle_resources_read(&self, params: Option<Value>) -> Result<Value, McpError> {
        let uri = params
            .as_ref()
            .and_then(|params| params.get("uri"))
            .and_then(|uri| uri.as_str())
            .ok_or_else(|| McpError::invalid_params("resources/read requires a uri"))?;

        if uri != INSTRUCTIONS_URI {
            warn!("Unknown resource: {}", uri);
            return Err(McpError::invalid_params(format!("Unknown resource: {}", uri)));
        }

        let text = std::fs::read_to_string(&self.instructions_path)
            .unwrap_or_else(|_| "Instructions not found.".to_string());

        Ok(json!({
            "contents": [ResourceContents {
                uri: uri.to_string(),
                mime_type: "text/markdown".to_string(),
                text,
            }]
        }))
    }

    fn handle_prompts_list(&self) -> Value {
        json!({
            "prompts": [Prompt {
                name: PROMPT_NAME.to_string(),
                description: "Activate the Kali CTF Solver persona for solving CTF challenges"
                    .to_string(),
                arguments: vec![PromptArgument {
                    name: "challenge_description".to_string(),
                    description: "Description of the CTF challenge to solve".to_string(),
                    required: true,
                }],
            }]
        })
    }

    fn handle_prompts_get(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params = params.unwrap_or_else(|| json!({}));

        let name = params
            .get("name")
            .and_then(|name| name.as_str())
            .ok_or_else(|| McpError::invalid_params("prompts/get requires a name"))?;

        if name != PROMPT_NAME {
            warn!("Unknown prompt: {}", name);
            return Err(McpError::invalid_params(format!("Unknown prompt: {}", name)));
        }

        // The prompt preamble tolerates a missing instructions file; the
        // resource surface is where the absence is reported.
        let base_prompt = std::fs::read_to_string(&self.instructions_path).unwrap_or_default();

        let challenge = params
            .get("arguments")
            .and_then(|arguments| arguments.get("challenge_description"))
            .and_then(|challenge| challenge.as_str())
            .unwrap_or("");

        let full_prompt = format!(
            "{}\n\n## Current Challenge\n\n{}\n\nBegin solving this challenge step by step. \
             Start with enumeration and analysis, then proceed with exploitation or analysis \
             as appropriate.",
            base_prompt, challenge
        );

        Ok(json!({
            "description": "Kali CTF Solver prompt",
            "messages": [PromptMessage::user(full_prompt)],
        }))
    }
}
