//! Tool Catalogue and Dispatch
//!
//! The static four-tool catalogue advertised over `tools/list`, the typed
//! [`ToolRequest`] each `tools/call` decodes into, and the exhaustive
//! dispatch over it. Tool names and argument shapes are closed at compile
//! time; an unrecognized name or malformed argument set never reaches a
//! handler.

use super::analyze::{self, AnalysisType};
use super::crack;
use super::executor::CommandRunner;
use super::scan::{self, ScanType};
use crate::mcp::protocol::Tool;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

/// Default wordlist for hash cracking
pub const DEFAULT_WORDLIST: &str = "/usr/share/wordlists/rockyou.txt";

/// A tools/call that failed before reaching a handler
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The tool name is not in the catalogue
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments object does not decode into the tool's parameters
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        /// Which tool the arguments were for
        tool: &'static str,
        /// The decoding failure
        source: serde_json::Error,
    },
}

/// Arguments for execute_command
///
/// `command` tolerates absence and decodes as empty, which the executor
/// answers with its fixed no-command error.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteCommandParams {
    /// The command string to run
    #[serde(default)]
    pub command: String,

    /// Directory to run in (process default when absent)
    #[serde(default)]
    pub working_directory: Option<String>,

    /// Per-command timeout in seconds (configured default when absent)
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Arguments for analyze_file
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeFileParams {
    /// Path of the file to analyze
    #[serde(default)]
    pub file_path: String,

    /// Requested analysis flavor
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

/// Arguments for crack_hash
#[derive(Debug, Clone, Deserialize)]
pub struct CrackHashParams {
    /// The hash to crack
    pub hash: String,

    /// Hash algorithm name, or "auto" to guess from length
    #[serde(default = "default_hash_type")]
    pub hash_type: String,

    /// Wordlist path (configured default when absent)
    #[serde(default)]
    pub wordlist: Option<String>,
}

fn default_hash_type() -> String {
    "auto".to_string()
}

/// Arguments for network_scan
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkScanParams {
    /// Target IP address or hostname
    pub target: String,

    /// Requested scan category
    #[serde(default)]
    pub scan_type: ScanType,

    /// Port restriction for the nmap categories
    #[serde(default)]
    pub ports: Option<String>,
}

/// A decoded tools/call, closed over the four known operations
#[derive(Debug, Clone)]
pub enum ToolRequest {
    /// Run one shell command
    ExecuteCommand(ExecuteCommandParams),

    /// Analyze a file with the plan matching its type
    AnalyzeFile(AnalyzeFileParams),

    /// Crack a hash with hashcat and john
    CrackHash(CrackHashParams),

    /// Scan a network target
    NetworkScan(NetworkScanParams),
}

impl ToolRequest {
    /// Decode a tool name and arguments object into a typed request
    pub fn parse(name: &str, arguments: serde_json::Value) -> Result<Self, DispatchError> {
        match name {
            "execute_command" => serde_json::from_value(arguments)
                .map(Self::ExecuteCommand)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: "execute_command",
                    source,
                }),
            "analyze_file" => serde_json::from_value(arguments)
                .map(Self::AnalyzeFile)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: "analyze_file",
                    source,
                }),
            "crack_hash" => serde_json::from_value(arguments)
                .map(Self::CrackHash)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: "crack_hash",
                    source,
                }),
            "network_scan" => serde_json::from_value(arguments)
                .map(Self::NetworkScan)
                .map_err(|source| DispatchError::InvalidArguments {
                    tool: "network_scan",
                    source,
                }),
            other => Err(DispatchError::UnknownTool(other.to_string())),
        }
    }

    /// The catalogue name of this request's tool
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::ExecuteCommand(_) => "execute_command",
            Self::AnalyzeFile(_) => "analyze_file",
            Self::CrackHash(_) => "crack_hash",
            Self::NetworkScan(_) => "network_scan",
        }
    }
}

/// Defaults filled in for optional tool arguments
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    /// Timeout for commands that do not carry their own
    pub timeout_secs: u64,

    /// Wordlist for crack_hash when the caller names none
    pub wordlist: String,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: super::executor::DEFAULT_TIMEOUT_SECS,
            wordlist: DEFAULT_WORDLIST.to_string(),
        }
    }
}

/// Run a typed tool request to its ordered result blocks
///
/// Every failure mode below this point is textual: the returned blocks may
/// carry error text, but the call itself always produces blocks.
pub async fn dispatch(
    runner: &dyn CommandRunner,
    request: ToolRequest,
    defaults: &ToolDefaults,
) -> Vec<String> {
    match request {
        ToolRequest::ExecuteCommand(params) => {
            let timeout = params.timeout.unwrap_or(defaults.timeout_secs);
            let working_dir = params.working_directory.as_deref().map(Path::new);
            let outcome = runner.run(&params.command, working_dir, timeout).await;
            vec![outcome.render(&params.command)]
        }
        ToolRequest::AnalyzeFile(params) => {
            analyze::analyze_file(runner, &params.file_path, params.analysis_type).await
        }
        ToolRequest::CrackHash(params) => {
            let wordlist = params
                .wordlist
                .unwrap_or_else(|| defaults.wordlist.clone());
            crack::crack_hash(runner, &params.hash, &params.hash_type, &wordlist).await
        }
        ToolRequest::NetworkScan(params) => {
            scan::network_scan(runner, &params.target, params.scan_type, params.ports.as_deref())
                .await
        }
    }
}

/// The static tool catalogue advertised over tools/list
pub fn catalog() -> Vec<Tool> {
    vec![
        Tool {
            name: "execute_command".to_string(),
            description: "Execute a terminal command in the Kali Linux environment. Use this \
                          for enumeration, exploitation, reverse engineering, steganography, \
                          forensics, OSINT, cryptography, and password-cracking tasks."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The terminal command to execute (e.g., 'nmap -sV target.com', 'strings binary', 'steghide extract -sf image.jpg')"
                    },
                    "working_directory": {
                        "type": "string",
                        "description": "Optional working directory for the command (default: current directory)"
                    },
                    "timeout": {
                        "type": "integer",
                        "description": "Command timeout in seconds (default: 300)"
                    }
                },
                "required": ["command"]
            }),
        },
        Tool {
            name: "analyze_file".to_string(),
            description: "Analyze a file using appropriate Kali tools. Automatically detects \
                          file type and uses relevant tools (binwalk, file, strings, exiftool, \
                          etc.)"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the file to analyze"
                    },
                    "analysis_type": {
                        "type": "string",
                        "enum": ["auto", "binary", "image", "archive", "text", "network"],
                        "description": "Type of analysis to perform (default: auto-detect)"
                    }
                },
                "required": ["file_path"]
            }),
        },
        Tool {
            name: "crack_hash".to_string(),
            description: "Attempt to crack a hash using hashcat or john the ripper. Supports \
                          various hash types."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "hash": {
                        "type": "string",
                        "description": "The hash to crack"
                    },
                    "hash_type": {
                        "type": "string",
                        "description": "Hash type (e.g., 'md5', 'sha256', 'bcrypt', 'NTLM'). Use 'auto' to detect automatically."
                    },
                    "wordlist": {
                        "type": "string",
                        "description": "Path to wordlist file (default: /usr/share/wordlists/rockyou.txt)"
                    }
                },
                "required": ["hash"]
            }),
        },
        Tool {
            name: "network_scan".to_string(),
            description: "Perform network enumeration and scanning using nmap, gobuster, \
                          nikto, etc."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "target": {
                        "type": "string",
                        "description": "Target IP address or hostname"
                    },
                    "scan_type": {
                        "type": "string",
                        "enum": ["port_scan", "service_scan", "vuln_scan", "web_enum", "all"],
                        "description": "Type of scan to perform"
                    },
                    "ports": {
                        "type": "string",
                        "description": "Port range or specific ports (e.g., '1-1000', '80,443,8080')"
                    }
                },
                "required": ["target"]
            }),
        },
    ]
}
