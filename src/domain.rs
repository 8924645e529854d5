use std::net::{IpAddr, ToSocketAddrs};
use std::time::Duration;
use tokio::task;
use tokio::time::timeout;

/// Domain recorded when the host cannot be resolved
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Prefix of the address field when resolution fails
pub const ERROR_PREFIX: &str = "Error:";

/// Host portion of a URL: whatever sits between the last `//` and the next `/`.
///
/// No scheme or path validation is done, so a port stays attached.
pub fn split_host(url: &str) -> &str {
    let after_scheme = url.split("//").last().unwrap_or(url);
    after_scheme.split('/').next().unwrap_or(after_scheme)
}

/// Resolves the host of `url` to an address.
///
/// Never fails: a lookup error comes back as `("Unknown", "Error: ...")`.
/// IPv4 results are preferred when the host has both families.
pub fn resolve(url: &str) -> (String, String) {
    let host = split_host(url);

    match lookup(host) {
        Ok(ip) => {
            ::log::debug!("Resolved {} to {}", host, ip);
            (host.to_string(), ip.to_string())
        }
        Err(details) => {
            ::log::warn!("Failed to resolve {:?}: {}", host, details);
            failure(details)
        }
    }
}

/// Runs [`resolve`] on the blocking pool and gives up after `limit`
pub async fn resolve_with_timeout(url: &str, limit: Duration) -> (String, String) {
    let owned = url.to_string();
    match timeout(limit, task::spawn_blocking(move || resolve(&owned))).await {
        Ok(Ok(resolved)) => resolved,
        Ok(Err(e)) => failure(format!("lookup task failed: {}", e)),
        Err(_) => {
            ::log::warn!("Timeout resolving {}", split_host(url));
            failure(format!("lookup timed out after {:.1}s", limit.as_secs_f64()))
        }
    }
}

fn failure(details: impl std::fmt::Display) -> (String, String) {
    (
        UNKNOWN_DOMAIN.to_string(),
        format!("{} {}", ERROR_PREFIX, details),
    )
}

fn lookup(host: &str) -> Result<IpAddr, String> {
    if host.is_empty() {
        return Err("empty host".to_string());
    }

    let addrs: Vec<IpAddr> = (host, 0)
        .to_socket_addrs()
        .map_err(|e| e.to_string())?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| format!("no address found for {}", host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host() {
        assert_eq!(split_host("https://example.com/path/page"), "example.com");
        assert_eq!(split_host("http://example.com:8080/x"), "example.com:8080");
        assert_eq!(split_host("example.com/path"), "example.com");
        assert_eq!(split_host("https://example.com"), "example.com");
        assert_eq!(split_host("https://proxy//example.org/a"), "example.org");
        assert_eq!(split_host(""), "");
    }

    #[test]
    fn test_resolve_literal_address() {
        let (domain, ip) = resolve("http://127.0.0.1/index.html");
        assert_eq!(domain, "127.0.0.1");
        assert_eq!(ip, "127.0.0.1");
    }

    #[test]
    fn test_unresolvable_host() {
        let (domain, ip) = resolve("https://no-such-host.invalid/page");
        assert_eq!(domain, UNKNOWN_DOMAIN);
        assert!(ip.starts_with(ERROR_PREFIX));
    }

    #[test]
    fn test_empty_host() {
        let (domain, ip) = resolve("https:///path");
        assert_eq!(domain, UNKNOWN_DOMAIN);
        assert_eq!(ip, "Error: empty host");
    }

    #[tokio::test]
    async fn test_resolve_with_timeout() {
        let (domain, ip) =
            resolve_with_timeout("http://127.0.0.1/", Duration::from_secs(5)).await;
        assert_eq!(domain, "127.0.0.1");
        assert_eq!(ip, "127.0.0.1");
    }
}
