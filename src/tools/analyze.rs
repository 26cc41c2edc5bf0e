//! File Analysis Tool
//!
//! Builds a fixed command plan for a file and runs it front to back. Which
//! branch of the plan applies is decided up front from the requested
//! analysis type and a crude substring look at the path; no command's output
//! steers a later command.

use super::executor::{run_rendered, CommandRunner};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Requested analysis flavor
///
/// `text` and `network` currently share the generic fallback plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Pick a plan from the path, with a leading `file` identification run
    #[default]
    Auto,
    /// Strings, hex dump, and hardening check
    Binary,
    /// Metadata, embedded data, and steganography probes
    Image,
    /// Embedded data and archive listings
    Archive,
    /// Generic string/head dump
    Text,
    /// Generic string/head dump
    Network,
}

/// Analyze a file with the plan matching its type
///
/// A nonexistent path short-circuits to a single error block with nothing
/// executed. Otherwise the plan always opens with type identification and a
/// listing, then the branch commands, one rendered block each in run order.
pub async fn analyze_file(
    runner: &dyn CommandRunner,
    file_path: &str,
    analysis_type: AnalysisType,
) -> Vec<String> {
    if !Path::new(file_path).exists() {
        return vec![format!("Error: File not found: {}", file_path)];
    }

    let mut results = Vec::new();

    // Auto gets a standalone identification pass before the plan proper.
    if analysis_type == AnalysisType::Auto {
        let file_type_cmd = format!("file '{}'", file_path);
        results.push(run_rendered(runner, &file_type_cmd).await);
    }

    results.push(format!("### [Analysis] Analyzing file: {}\n", file_path));

    let mut commands = vec![
        format!("file '{}'", file_path),
        format!("ls -lah '{}'", file_path),
    ];

    // First match wins: a path mentioning "image" outranks the requested
    // type, same for "archive".
    let lowered = file_path.to_lowercase();
    if lowered.contains("image") || analysis_type == AnalysisType::Image {
        commands.push(format!("exiftool '{}'", file_path));
        commands.push(format!("binwalk '{}'", file_path));
        commands.push(format!(
            "steghide info '{}' 2>&1 || echo 'steghide not available or no steganography detected'",
            file_path
        ));
        commands.push(format!("strings '{}' | head -50", file_path));
    } else if lowered.contains("archive") || analysis_type == AnalysisType::Archive {
        commands.push(format!("binwalk '{}'", file_path));
        commands.push(format!(
            "7z l '{0}' 2>&1 || unzip -l '{0}' 2>&1 || tar -tzf '{0}' 2>&1",
            file_path
        ));
    } else if analysis_type == AnalysisType::Binary {
        commands.push(format!("strings '{}'", file_path));
        commands.push(format!("hexdump -C '{}' | head -50", file_path));
        commands.push(format!(
            "checksec --file='{}' 2>&1 || echo 'checksec not available'",
            file_path
        ));
    } else {
        commands.push(format!("strings '{}' | head -50", file_path));
        commands.push(format!("head -20 '{}'", file_path));
    }

    for command in &commands {
        results.push(run_rendered(runner, command).await);
    }

    results
}
