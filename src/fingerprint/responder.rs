//! Canned replies for each classification.
//!
//! The decoy never completes a real handshake; it returns just enough bytes
//! to look like a misconfigured production box and keep the prober guessing.

use crate::fingerprint::classifier::Classification;

/// Fixed HTML body served to HTTP probes.
const FORBIDDEN_BODY: &str = "<html><head><title>403 Forbidden</title></head>\
<body><h1>Access Forbidden.</h1></body></html>";

/// Server identity advertised in the decoy HTTP response.
const SERVER_HEADER: &str = "Apache/2.4.29 (Ubuntu)";

/// Banner returned to SSH clients.
const SSH_BANNER: &[u8] = b"SSH-2.0-OpenSSH_7.4\r\n";

/// Reply for traffic that matched no known protocol.
const ACCESS_DENIED: &[u8] = b"Access Denied.\r\n";

/// Build the reply for a classification.
///
/// Scanner probes and empty probes get an empty reply: the connection closes
/// without a byte written, so the scanner learns nothing from the response.
pub fn response_for(classification: Classification) -> Vec<u8> {
    match classification {
        Classification::HttpRequest => http_forbidden(),
        Classification::SshHandshake => SSH_BANNER.to_vec(),
        Classification::Unrecognized => ACCESS_DENIED.to_vec(),
        Classification::ScannerProbe | Classification::EmptyProbe => Vec::new(),
    }
}

/// Complete HTTP/1.1 403 response. Content-Length is computed from the body
/// constant so the two cannot drift apart.
fn http_forbidden() -> Vec<u8> {
    format!(
        "HTTP/1.1 403 Forbidden\r\n\
         Content-Type: text/html; charset=UTF-8\r\n\
         Content-Length: {}\r\n\
         Server: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        FORBIDDEN_BODY.len(),
        SERVER_HEADER,
        FORBIDDEN_BODY
    )
    .into_bytes()
}
