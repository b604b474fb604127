//! # OAuth redirect receiver
//!
//! The hosted backend finishes an OAuth sign-in by sending the browser to the
//! configured `redirect_to` URL. [`LoopbackRedirect`] listens on that address
//! (a loopback `http://` URL) for as long as the sign-in is open and hands the
//! callback URL back to [`Auth::complete_oauth`](crate::Auth::complete_oauth).
//!
//! The backend puts the tokens in the URL fragment, which browsers never send
//! to a server. A request without a query therefore gets a small page that
//! reloads the same path with the fragment moved into the query string; the
//! second request carries the tokens (or the provider's `error`).
//!
//! | Request | Response | Receiver |
//! |---------|----------|----------|
//! | other path | `404` | keeps waiting |
//! | callback path, no query | fragment relay page | keeps waiting |
//! | callback path with query | "you can close this window" | returns the URL |

use std::io;
use std::net::{IpAddr, Ipv4Addr};

use api::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Host;

const MAX_REQUEST_HEAD: usize = 8 * 1024;

const RELAY_PAGE: &str = "<!doctype html><html><body><p>Completing sign-in…</p><script>\
if (location.hash.length > 1) {\
  location.replace(location.pathname + '?' + location.hash.substring(1));\
} else {\
  document.body.textContent = 'Sign-in did not complete. You can close this window.';\
}\
</script></body></html>";

const DONE_PAGE: &str =
    "<!doctype html><html><body><p>Signed in. You can close this window and return to the app.</p></body></html>";

#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    #[error("redirect URL {0} is not a loopback http address")]
    NotLoopback(String),
    #[error("redirect listener failed: {0}")]
    Io(#[from] io::Error),
}

/// A bound listener for one OAuth callback.
#[derive(Debug)]
pub struct LoopbackRedirect {
    listener: TcpListener,
    url: Url,
}

impl LoopbackRedirect {
    /// Listen on the host and port of `redirect`. Port 0 picks a free port;
    /// [`url`](Self::url) then reports the real one.
    pub async fn bind(redirect: &Url) -> Result<Self, RedirectError> {
        if redirect.scheme() != "http" {
            return Err(RedirectError::NotLoopback(redirect.to_string()));
        }
        let ip: IpAddr = match redirect.host() {
            Some(Host::Ipv4(addr)) if addr.is_loopback() => addr.into(),
            Some(Host::Ipv6(addr)) if addr.is_loopback() => addr.into(),
            Some(Host::Domain("localhost")) => Ipv4Addr::LOCALHOST.into(),
            _ => return Err(RedirectError::NotLoopback(redirect.to_string())),
        };
        let port = redirect.port_or_known_default().unwrap_or(80);
        let listener = TcpListener::bind((ip, port)).await?;

        let mut url = redirect.clone();
        let bound = listener.local_addr()?.port();
        if url.set_port(Some(bound)).is_err() {
            return Err(RedirectError::NotLoopback(redirect.to_string()));
        }
        tracing::debug!(%url, "waiting for oauth redirect");
        Ok(Self { listener, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Serve requests until one arrives on the callback path with a query.
    pub async fn accept_callback(self) -> Result<Url, RedirectError> {
        loop {
            let (mut stream, _) = self.listener.accept().await?;
            let target = match read_request_target(&mut stream).await {
                Ok(Some(target)) => target,
                Ok(None) => {
                    respond(&mut stream, "400 Bad Request", "").await;
                    continue;
                }
                Err(e) => {
                    tracing::debug!("dropping redirect connection: {e}");
                    continue;
                }
            };
            let Ok(requested) = self.url.join(&target) else {
                respond(&mut stream, "400 Bad Request", "").await;
                continue;
            };
            if requested.path() != self.url.path() {
                respond(&mut stream, "404 Not Found", "").await;
                continue;
            }
            if requested.query().map_or(true, str::is_empty) {
                respond(&mut stream, "200 OK", RELAY_PAGE).await;
                continue;
            }
            respond(&mut stream, "200 OK", DONE_PAGE).await;
            tracing::info!("oauth redirect received");
            return Ok(requested);
        }
    }
}

/// The request target of the first request line, `None` when it is not a GET.
async fn read_request_target(stream: &mut TcpStream) -> io::Result<Option<String>> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") && head.len() < MAX_REQUEST_HEAD {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
    }
    let head = String::from_utf8_lossy(&head);
    let mut parts = head.lines().next().unwrap_or_default().split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(target)) if target.starts_with('/') => Ok(Some(target.to_string())),
        _ => Ok(None),
    }
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        tracing::debug!("could not answer redirect request: {e}");
    }
    let _ = stream.shutdown().await;
}
