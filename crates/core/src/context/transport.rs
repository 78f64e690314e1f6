use std::fmt;

use serde::Serialize;

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_HTTPS_PORT: u16 = 443;

/// Raw transport metadata as handed over by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMeta {
    /// Path of the script (or route) that received the request.
    pub script_name: String,
    pub server_name: String,
    pub server_port: Option<u16>,
    /// Set when the connection itself is TLS.
    pub tls: bool,
    /// Value of `X-Forwarded-Proto`.
    pub forwarded_proto: Option<String>,
    /// Value of `X-Forwarded-Ssl`.
    pub forwarded_ssl: Option<String>,
    /// Value of `Accept-Language`.
    pub accept_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized transport facts used to build links back to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportFacts {
    pub script: String,
    pub url_path: String,
    pub host: String,
    /// Empty for the default port, `:<port>` otherwise.
    pub port: String,
    pub scheme: Scheme,
}

impl TransportFacts {
    /// Host followed by the rendered port, e.g. `example.org:8080`.
    pub fn server(&self) -> String {
        format!("{}{}", self.host, self.port)
    }

    /// Absolute URL of the directory the script lives in.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.server(), self.url_path)
    }
}

/// Derives [`TransportFacts`] from raw metadata. Never fails.
pub fn extract_transport_facts(meta: &TransportMeta) -> TransportFacts {
    TransportFacts {
        script: meta.script_name.clone(),
        url_path: dirname(&meta.script_name),
        host: meta.server_name.clone(),
        port: render_port(meta.server_port),
        scheme: detect_scheme(meta),
    }
}

fn detect_scheme(meta: &TransportMeta) -> Scheme {
    let header_is = |header: &Option<String>, expected: &str| {
        header
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(expected))
    };

    if meta.tls
        || meta.server_port == Some(DEFAULT_HTTPS_PORT)
        || header_is(&meta.forwarded_proto, "https")
        || header_is(&meta.forwarded_ssl, "on")
    {
        Scheme::Https
    } else {
        Scheme::Http
    }
}

fn render_port(port: Option<u16>) -> String {
    match port {
        None | Some(DEFAULT_HTTP_PORT) => String::new(),
        Some(port) => format!(":{port}"),
    }
}

/// Parent directory of a slash-separated path.
fn dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." }.to_string();
    }

    match trimmed.rfind('/') {
        None => ".".to_string(),
        Some(idx) => match trimmed[..idx].trim_end_matches('/') {
            "" => "/".to_string(),
            parent => parent.to_string(),
        },
    }
}
