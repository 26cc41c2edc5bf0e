//! Hash Cracking Tool
//!
//! Plans the fixed hashcat / john / result-check sequence for a single hash.
//! Every stage runs unconditionally; stage output is never parsed, so a
//! cracked hash shows up in the result text rather than short-circuiting the
//! plan.

use super::executor::{run_rendered, CommandRunner, DEFAULT_TIMEOUT_SECS};

/// Fixed staging path the hash is written to for john
///
/// Shared across invocations with no locking or uniqueness; concurrent
/// cracks race on it.
pub const HASH_FILE: &str = "/tmp/hash_to_crack.txt";

/// Fixed path hashcat writes recovered hashes to
pub const HASHCAT_RESULT_FILE: &str = "/tmp/hashcat_result.txt";

/// Hash-algorithm name to hashcat mode number, keyed lowercase
pub const HASH_MODES: &[(&str, &str)] = &[
    ("md5", "0"),
    ("sha1", "100"),
    ("sha256", "1400"),
    ("sha512", "1700"),
    ("bcrypt", "3200"),
    ("ntlm", "1000"),
];

/// Look up the hashcat mode for a hash type (case-insensitive)
///
/// Unknown types fall back to mode 0 (MD5).
pub fn hashcat_mode(hash_type: &str) -> &'static str {
    let lowered = hash_type.to_lowercase();
    HASH_MODES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, mode)| *mode)
        .unwrap_or("0")
}

/// Guess a hash type from its character length
///
/// 32 chars is ambiguous (MD5 shares the length with NTLM and MD4) and
/// resolves to md5; callers that know better pass an explicit type.
pub fn detect_hash_type(hash: &str) -> &'static str {
    match hash.chars().count() {
        32 => "md5",
        40 => "sha1",
        64 => "sha256",
        _ => "md5",
    }
}

/// Attempt to crack a hash with hashcat, then john, then collect results
///
/// Returns one header block plus one rendered block per visible stage. The
/// staging write between hashcat and john also goes through the runner, but
/// its output is dropped.
pub async fn crack_hash(
    runner: &dyn CommandRunner,
    hash: &str,
    hash_type: &str,
    wordlist: &str,
) -> Vec<String> {
    let resolved: &str = if hash_type == "auto" {
        detect_hash_type(hash)
    } else {
        hash_type
    };

    let mut results = vec![format!(
        "### [Analysis] Attempting to crack {} hash: {}\n",
        resolved, hash
    )];

    let hashcat_cmd = format!(
        "hashcat -m {} '{}' '{}' --potfile-disable -o {} 2>&1 || echo 'hashcat failed or not available'",
        hashcat_mode(resolved),
        hash,
        wordlist,
        HASHCAT_RESULT_FILE
    );
    results.push(run_rendered(runner, &hashcat_cmd).await);

    // Stage the hash for john; this write's own output is not part of the
    // response.
    let stage_cmd = format!("echo '{}' > {}", hash, HASH_FILE);
    let _ = runner.run(&stage_cmd, None, DEFAULT_TIMEOUT_SECS).await;

    let john_cmd = format!(
        "john --format={} --wordlist='{}' {} 2>&1 || echo 'john failed or not available'",
        resolved, wordlist, HASH_FILE
    );
    results.push(run_rendered(runner, &john_cmd).await);

    let check_cmd = format!(
        "cat {} 2>&1 || john --show --format={} {} 2>&1",
        HASHCAT_RESULT_FILE, resolved, HASH_FILE
    );
    results.push(run_rendered(runner, &check_cmd).await);

    results
}
