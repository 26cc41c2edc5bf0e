//! Network Scan Tool
//!
//! Runs the nmap/gobuster scan categories against a target. Categories are
//! gated, not exclusive: `all` walks every gate in declaration order.

use super::executor::{run_rendered, CommandRunner};
use serde::{Deserialize, Serialize};

/// Wordlist gobuster enumerates with
pub const WEB_WORDLIST: &str = "/usr/share/wordlists/dirb/common.txt";

/// Requested scan category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    /// SYN port sweep
    PortScan,
    /// Service and version detection
    ServiceScan,
    /// nmap vuln script battery
    VulnScan,
    /// Web directory enumeration
    WebEnum,
    /// Every category above, in order
    #[default]
    All,
}

impl ScanType {
    /// Whether this request covers the given category
    pub fn covers(self, category: ScanType) -> bool {
        self == category || self == ScanType::All
    }
}

/// Scan a target with the requested categories
///
/// `ports` restricts the nmap categories when present; web enumeration
/// ignores it and always probes the plain http URL form.
pub async fn network_scan(
    runner: &dyn CommandRunner,
    target: &str,
    scan_type: ScanType,
    ports: Option<&str>,
) -> Vec<String> {
    let mut results = vec![format!("### [Analysis] Scanning target: {}\n", target)];

    let port_arg = ports
        .map(|p| format!("-p {} ", p))
        .unwrap_or_default();

    if scan_type.covers(ScanType::PortScan) {
        let cmd = format!("nmap -sS {}{}", port_arg, target);
        results.push(run_rendered(runner, &cmd).await);
    }

    if scan_type.covers(ScanType::ServiceScan) {
        let cmd = format!("nmap -sV {}{}", port_arg, target);
        results.push(run_rendered(runner, &cmd).await);
    }

    if scan_type.covers(ScanType::VulnScan) {
        let cmd = format!("nmap --script vuln {}{}", port_arg, target);
        results.push(run_rendered(runner, &cmd).await);
    }

    if scan_type.covers(ScanType::WebEnum) {
        let cmd = format!(
            "gobuster dir -u http://{} -w {} 2>&1 || echo 'gobuster not available'",
            target, WEB_WORDLIST
        );
        results.push(run_rendered(runner, &cmd).await);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::RecordingRunner;

    #[tokio::test]
    async fn test_all_runs_exactly_four_commands_in_order() {
        let runner = RecordingRunner::new();
        let results = network_scan(&runner, "example.com", ScanType::All, None).await;

        let commands = runner.commands();
        assert_eq!(
            commands,
            vec![
                "nmap -sS example.com".to_string(),
                "nmap -sV example.com".to_string(),
                "nmap --script vuln example.com".to_string(),
                "gobuster dir -u http://example.com -w /usr/share/wordlists/dirb/common.txt 2>&1 || echo 'gobuster not available'"
                    .to_string(),
            ]
        );
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], "### [Analysis] Scanning target: example.com\n");
    }

    #[tokio::test]
    async fn test_ports_restrict_nmap_categories() {
        let runner = RecordingRunner::new();
        network_scan(&runner, "10.0.0.5", ScanType::All, Some("80,443")).await;

        let commands = runner.commands();
        assert_eq!(commands[0], "nmap -sS -p 80,443 10.0.0.5");
        assert_eq!(commands[1], "nmap -sV -p 80,443 10.0.0.5");
        assert_eq!(commands[2], "nmap --script vuln -p 80,443 10.0.0.5");
    }

    #[tokio::test]
    async fn test_web_enum_ignores_ports() {
        let runner = RecordingRunner::new();
        network_scan(&runner, "example.com", ScanType::WebEnum, Some("8080")).await;

        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with("gobuster dir -u http://example.com"));
        assert!(!commands[0].contains("8080"));
    }

    #[tokio::test]
    async fn test_single_category_requests() {
        let cases = [
            (ScanType::PortScan, "nmap -sS "),
            (ScanType::ServiceScan, "nmap -sV "),
            (ScanType::VulnScan, "nmap --script vuln "),
            (ScanType::WebEnum, "gobuster dir "),
        ];

        for (scan_type, prefix) in cases {
            let runner = RecordingRunner::new();
            let results = network_scan(&runner, "target.local", scan_type, None).await;

            let commands = runner.commands();
            assert_eq!(commands.len(), 1, "{:?} should run one command", scan_type);
            assert!(
                commands[0].starts_with(prefix),
                "{:?}: got {:?}",
                scan_type,
                commands[0]
            );
            assert_eq!(results.len(), 2);
        }
    }

    #[test]
    fn test_covers() {
        assert!(ScanType::All.covers(ScanType::PortScan));
        assert!(ScanType::All.covers(ScanType::WebEnum));
        assert!(ScanType::VulnScan.covers(ScanType::VulnScan));
        assert!(!ScanType::VulnScan.covers(ScanType::PortScan));
    }

    #[test]
    fn test_scan_type_deserializes_snake_case() {
        let parsed: ScanType = serde_json::from_str("\"port_scan\"").unwrap();
        assert_eq!(parsed, ScanType::PortScan);

        let parsed: ScanType = serde_json::from_str("\"web_enum\"").unwrap();
        assert_eq!(parsed, ScanType::WebEnum);

        assert!(serde_json::from_str::<ScanType>("\"udp\"").is_err());
    }
}
