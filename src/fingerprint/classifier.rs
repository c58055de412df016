//! Probe classification.
//!
//! # Responsibilities
//! - Map the first bytes a client sends to a protocol guess
//! - Stay total: every probe yields exactly one classification
//! - Keep the rule order explicit and tested

/// HTTP method tokens that mark a probe as a generic HTTP request.
/// Case-sensitive, trailing space included: `"get /"` does not match.
const HTTP_METHOD_PREFIXES: [&str; 5] = ["GET ", "POST ", "HEAD ", "PUT ", "OPTIONS "];

/// Version exchange prefix sent by SSH clients.
const SSH_PREFIX: &str = "SSH-2.0-";

/// Exact HTTP/1.0 request emitted by scanners probing for any HTTP speaker.
/// No current browser sends this form, so it is checked before the generic
/// method rule; the probe is compared with surrounding whitespace trimmed.
const SCANNER_HTTP10_SIGNATURE: &str = "GET / HTTP/1.0";

/// Protocol guess for a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Probe starts with a known HTTP method token.
    HttpRequest,
    /// Probe starts with an SSH version exchange.
    SshHandshake,
    /// Probe carries a known scanner fingerprint.
    ScannerProbe,
    /// Bytes arrived but matched no rule.
    Unrecognized,
    /// The peer sent nothing before closing or going silent.
    EmptyProbe,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Classification::HttpRequest => "http-request",
            Classification::SshHandshake => "ssh-handshake",
            Classification::ScannerProbe => "scanner-probe",
            Classification::Unrecognized => "unrecognized",
            Classification::EmptyProbe => "empty-probe",
        };
        f.write_str(label)
    }
}

/// Classify a decoded probe. Rules run in order; the first match wins:
///
/// 1. the exact scanner HTTP/1.0 signature
/// 2. HTTP method prefixes
/// 3. the SSH version-exchange prefix
/// 4. `"nmap"` anywhere, any letter case
/// 5. otherwise [`Classification::Unrecognized`]
///
/// Zero-byte probes are handled upstream as [`Classification::EmptyProbe`]
/// and never reach this function.
pub fn classify(probe: &str) -> Classification {
    if probe.trim() == SCANNER_HTTP10_SIGNATURE {
        return Classification::ScannerProbe;
    }
    if HTTP_METHOD_PREFIXES
        .iter()
        .any(|method| probe.starts_with(method))
    {
        return Classification::HttpRequest;
    }
    if probe.starts_with(SSH_PREFIX) {
        return Classification::SshHandshake;
    }
    if probe.to_ascii_lowercase().contains("nmap") {
        return Classification::ScannerProbe;
    }
    Classification::Unrecognized
}
