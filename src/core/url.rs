//! Docker daemon and registry URL normalization.
//!
//! These functions are total: malformed input yields a best-effort URL,
//! defaulting to the TLS variant, rather than an error.

/// Plain-HTTP Docker daemon port.
pub const DOCKER_HTTP_PORT: u16 = 2375;

const TCP_SCHEME: &str = "tcp://";

/// Rewrite a `tcp://host:port` daemon URL to `http` or `https`.
///
/// Port 2375 maps to `http`; every other port maps to `https`.
pub fn convert_tcp_to_http_url(url: &str) -> String {
    convert_tcp_to_http_url_with_port(url, DOCKER_HTTP_PORT)
}

/// Same as [`convert_tcp_to_http_url`] with a custom plain-HTTP port.
///
/// URLs without a `tcp://` scheme are returned unchanged.
pub fn convert_tcp_to_http_url_with_port(url: &str, http_port: u16) -> String {
    let Some(rest) = url.strip_prefix(TCP_SCHEME) else {
        return url.to_string();
    };

    let scheme = if daemon_port(rest) == Some(http_port) {
        "http"
    } else {
        "https"
    };

    format!("{}://{}", scheme, rest)
}

/// Port of a scheme-less `host:port[/path]` string.
fn daemon_port(rest: &str) -> Option<u16> {
    let authority = rest.split('/').next().unwrap_or(rest);
    let (_, port) = authority.rsplit_once(':')?;
    port.parse().ok()
}

/// First candidate that is present and non-empty.
pub fn first_registry_of<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .flatten()
        .find(|candidate| !candidate.is_empty())
}

/// Prefix `https://` unless the URL already has an HTTP(S) scheme.
pub fn ensure_registry_http_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_port_converts_to_http() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://0.0.0.0:2375"),
            "http://0.0.0.0:2375"
        );
    }

    #[test]
    fn tls_port_converts_to_https() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://0.0.0.0:2376"),
            "https://0.0.0.0:2376"
        );
    }

    #[test]
    fn unknown_port_defaults_to_https() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://127.0.0.1:32770"),
            "https://127.0.0.1:32770"
        );
    }

    #[test]
    fn missing_port_defaults_to_https() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://docker.local"),
            "https://docker.local"
        );
    }

    #[test]
    fn port_lookalike_in_host_is_ignored() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://host2375:4000"),
            "https://host2375:4000"
        );
        assert_eq!(
            convert_tcp_to_http_url("tcp://host:23750"),
            "https://host:23750"
        );
    }

    #[test]
    fn path_after_port_is_preserved() {
        assert_eq!(
            convert_tcp_to_http_url("tcp://docker:2375/v1.41"),
            "http://docker:2375/v1.41"
        );
    }

    #[test]
    fn ipv6_host_is_supported() {
        assert_eq!(convert_tcp_to_http_url("tcp://[::1]:2375"), "http://[::1]:2375");
        assert_eq!(convert_tcp_to_http_url("tcp://[::1]"), "https://[::1]");
    }

    #[test]
    fn non_tcp_urls_are_untouched() {
        assert_eq!(
            convert_tcp_to_http_url("unix:///var/run/docker.sock"),
            "unix:///var/run/docker.sock"
        );
    }

    #[test]
    fn custom_http_port() {
        assert_eq!(
            convert_tcp_to_http_url_with_port("tcp://host:8080", 8080),
            "http://host:8080"
        );
        assert_eq!(
            convert_tcp_to_http_url_with_port("tcp://host:2375", 8080),
            "https://host:2375"
        );
    }

    #[test]
    fn first_registry_prefers_earliest() {
        assert_eq!(
            first_registry_of(&[
                Some("quay.io"),
                Some("docker.io"),
                Some("registry.access.redhat.io")
            ]),
            Some("quay.io")
        );
        assert_eq!(
            first_registry_of(&[None, None, Some("registry.access.redhat.io")]),
            Some("registry.access.redhat.io")
        );
    }

    #[test]
    fn first_registry_skips_empty_and_handles_all_absent() {
        assert_eq!(first_registry_of(&[Some(""), Some("docker.io")]), Some("docker.io"));
        assert_eq!(first_registry_of(&[None, Some("")]), None);
        assert_eq!(first_registry_of(&[]), None);
    }

    #[test]
    fn ensure_http_keeps_existing_scheme() {
        assert_eq!(ensure_registry_http_url("http://registor"), "http://registor");
        assert_eq!(ensure_registry_http_url("https://quay.io"), "https://quay.io");
    }

    #[test]
    fn ensure_http_prefixes_https() {
        assert_eq!(ensure_registry_http_url("registerurl"), "https://registerurl");
        assert_eq!(
            ensure_registry_http_url("tcp://docker:2375"),
            "https://tcp://docker:2375"
        );
    }
}
