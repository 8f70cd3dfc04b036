//! Static asset server for the browser build
//!
//! Serves files under a fixed root over plain HTTP: GET and HEAD only, no
//! directory listings, nothing outside the root.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rand::Rng;
use thiserror::Error;
use tokio::net::TcpListener;

/// Lowest port the server will use (first unprivileged port)
pub const MIN_PORT: u16 = 1025;
pub const MAX_PORT: u16 = 65535;
/// Random ports tried before giving up
pub const MAX_BIND_ATTEMPTS: usize = 5;

/// Environment variable naming the asset root
pub const ROOT_ENV: &str = "LASER_SWITCH_ROOT";
pub const DEFAULT_ROOT: &str = "web";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Fatal startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid port: \"{0}\". Please provide an integer between 1025 and 65535.")]
    InvalidPort(String),
    #[error("failed to start server on port {port}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to bind to a port after {0} attempts")]
    Exhausted(usize),
    #[error("asset root {} is not usable", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a request path was refused before touching the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Malformed percent-encoding or embedded NUL
    BadRequest,
    /// Path climbs out of the root
    Forbidden,
}

/// Parse an explicit port argument
pub fn parse_port(arg: &str) -> Result<u16, ServerError> {
    arg.trim()
        .parse::<u32>()
        .ok()
        .filter(|port| (u32::from(MIN_PORT)..=u32::from(MAX_PORT)).contains(port))
        .map(|port| port as u16)
        .ok_or_else(|| ServerError::InvalidPort(arg.to_string()))
}

/// Uniformly random port in `[MIN_PORT, MAX_PORT]`
pub fn random_port<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.random_range(MIN_PORT..=MAX_PORT)
}

/// Content type for a file, by extension
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Map a request path onto a file path under `root`.
///
/// The path is percent-decoded and normalized lexically; any `..` that would
/// climb above the root is refused. A trailing `/` (or the bare root) maps to
/// `index.html`.
pub fn resolve_request_path(root: &Path, uri_path: &str) -> Result<PathBuf, Rejection> {
    let decoded = urlencoding::decode(uri_path).map_err(|_| Rejection::BadRequest)?;
    if decoded.contains('\0') {
        return Err(Rejection::BadRequest);
    }

    let mut relative = PathBuf::new();
    for component in Path::new(decoded.as_ref()).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(Rejection::Forbidden);
                }
            }
            Component::Prefix(_) => return Err(Rejection::Forbidden),
        }
    }

    if decoded.ends_with('/') || relative.as_os_str().is_empty() {
        relative.push("index.html");
    }

    Ok(root.join(relative))
}

/// Canonical asset root shared by request handlers
#[derive(Debug, Clone)]
pub struct AssetRoot(Arc<PathBuf>);

impl AssetRoot {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|source| ServerError::Root {
            path: path.to_path_buf(),
            source,
        })?;
        if !canonical.is_dir() {
            return Err(ServerError::Root {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::NotADirectory, "not a directory"),
            });
        }
        Ok(Self(Arc::new(canonical)))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Build the asset router; every path goes through [`serve_asset`]
pub fn router(root: AssetRoot) -> Router {
    Router::new().fallback(serve_asset).with_state(root)
}

/// Serve one request
pub async fn serve_asset(State(root): State<AssetRoot>, method: Method, uri: Uri) -> Response {
    let response = respond(root.path(), &method, uri.path()).await;
    log::info!("{} {} -> {}", method, uri.path(), response.status().as_u16());
    response
}

fn plain(status: StatusCode, message: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], message).into_response()
}

async fn respond(root: &Path, method: &Method, uri_path: &str) -> Response {
    if method != Method::GET && method != Method::HEAD {
        let mut response = plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        response
            .headers_mut()
            .insert(header::ALLOW, header::HeaderValue::from_static("GET, HEAD"));
        return response;
    }

    let path = match resolve_request_path(root, uri_path) {
        Ok(path) => path,
        Err(Rejection::BadRequest) => return plain(StatusCode::BAD_REQUEST, "Bad Request"),
        Err(Rejection::Forbidden) => return plain(StatusCode::FORBIDDEN, "Forbidden"),
    };

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return plain(StatusCode::NOT_FOUND, "Not Found"),
    };

    // Symlinks may still point outside the root
    match tokio::fs::canonicalize(&path).await {
        Ok(real) if real.starts_with(root) => {}
        Ok(_) => return plain(StatusCode::FORBIDDEN, "Forbidden"),
        Err(_) => return plain(StatusCode::NOT_FOUND, "Not Found"),
    }

    let content_type = mime_type(&path);

    if method == Method::HEAD {
        return (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CONTENT_LENGTH, metadata.len().to_string()),
            ],
        )
            .into_response();
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(err) => {
            log::error!("Error reading file {}: {}", path.display(), err);
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Ports to try: the explicit one alone, or [`MAX_BIND_ATTEMPTS`] random ones
pub fn candidate_ports<R: Rng + ?Sized>(explicit: Option<u16>, rng: &mut R) -> Vec<u16> {
    match explicit {
        Some(port) => vec![port],
        None => (0..MAX_BIND_ATTEMPTS).map(|_| random_port(rng)).collect(),
    }
}

/// Bind the first free port among `ports`.
///
/// `retry_in_use` moves on to the next candidate when a port is taken; any
/// other failure is fatal straight away.
pub async fn bind_first_free(
    ports: &[u16],
    retry_in_use: bool,
) -> Result<TcpListener, ServerError> {
    for &port in ports {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(err) if retry_in_use && err.kind() == ErrorKind::AddrInUse => {
                log::warn!("Port {} in use, trying another", port);
            }
            Err(source) => return Err(ServerError::Bind { port, source }),
        }
    }
    Err(ServerError::Exhausted(ports.len()))
}

/// Bind the explicit port, or a random one with retries
pub async fn bind<R: Rng + ?Sized>(
    explicit: Option<u16>,
    rng: &mut R,
) -> Result<TcpListener, ServerError> {
    let ports = candidate_ports(explicit, rng);
    bind_first_free(&ports, explicit.is_none()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    /// Asset root with an index page, a nested script and a binary blob.
    /// The files are removed when the returned guard drops.
    fn scratch_root() -> (TempDir, AssetRoot) {
        let dir = tempdir().expect("failed to create temp directory");
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("index.html"), "<canvas></canvas>").unwrap();
        fs::write(dir.path().join("pkg").join("game.js"), "export {};").unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 1, 2]).unwrap();
        let root = AssetRoot::new(dir.path()).unwrap();
        (dir, root)
    }

    async fn request(root: &AssetRoot, method: Method, path: &'static str) -> Response {
        serve_asset(State(root.clone()), method, Uri::from_static(path)).await
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[test]
    fn test_parse_port_bounds() {
        assert_eq!(parse_port("1025").unwrap(), 1025);
        assert_eq!(parse_port("65535").unwrap(), 65535);
        assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
        for bad in ["1024", "65536", "0", "-1", "http", "80.5", ""] {
            assert!(matches!(parse_port(bad), Err(ServerError::InvalidPort(_))), "{bad}");
        }
    }

    #[test]
    fn test_random_ports_in_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let ports = candidate_ports(None, &mut rng);
        assert_eq!(ports.len(), MAX_BIND_ATTEMPTS);
        assert!(ports.iter().all(|p| (MIN_PORT..=MAX_PORT).contains(p)));
        assert_eq!(candidate_ports(Some(4000), &mut rng), vec![4000]);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type(Path::new("a/index.html")), "text/html; charset=utf-8");
        assert_eq!(mime_type(Path::new("game.JS")), "application/javascript; charset=utf-8");
        assert_eq!(mime_type(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_type(Path::new("game_bg.wasm")), "application/wasm");
        assert_eq!(mime_type(Path::new("blob.bin")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("Makefile")), "application/octet-stream");
    }

    #[test]
    fn test_resolve_request_path() {
        let root = Path::new("/srv/game");
        assert_eq!(
            resolve_request_path(root, "/").unwrap(),
            PathBuf::from("/srv/game/index.html")
        );
        assert_eq!(
            resolve_request_path(root, "/pkg/").unwrap(),
            PathBuf::from("/srv/game/pkg/index.html")
        );
        assert_eq!(
            resolve_request_path(root, "/pkg/../main.js").unwrap(),
            PathBuf::from("/srv/game/main.js")
        );
        assert_eq!(
            resolve_request_path(root, "/my%20file.txt").unwrap(),
            PathBuf::from("/srv/game/my file.txt")
        );
        assert_eq!(
            resolve_request_path(root, "/../etc/passwd"),
            Err(Rejection::Forbidden)
        );
        assert_eq!(
            resolve_request_path(root, "/pkg/%2e%2e/%2e%2e/secret"),
            Err(Rejection::Forbidden)
        );
        assert_eq!(resolve_request_path(root, "/%ff%fe"), Err(Rejection::BadRequest));
        assert_eq!(resolve_request_path(root, "/a%00b"), Err(Rejection::BadRequest));
    }

    #[tokio::test]
    async fn test_get_index() {
        let (_dir, root) = scratch_root();
        let response = request(&root, Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<canvas></canvas>");
    }

    #[tokio::test]
    async fn test_get_nested_and_fallback_mime() {
        let (_dir, root) = scratch_root();
        let response = request(&root, Method::GET, "/pkg/game.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "application/javascript; charset=utf-8");

        let response = request(&root, Method::GET, "/blob.bin").await;
        assert_eq!(content_type(&response), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, root) = scratch_root();
        let response = request(&root, Method::HEAD, "/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        let (_dir, root) = scratch_root();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
            let response = request(&root, method, "/index.html").await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[tokio::test]
    async fn test_missing_and_directories_are_404() {
        let (_dir, root) = scratch_root();
        assert_eq!(
            request(&root, Method::GET, "/nope.js").await.status(),
            StatusCode::NOT_FOUND
        );
        // Directory without trailing slash is not a file
        assert_eq!(
            request(&root, Method::GET, "/pkg").await.status(),
            StatusCode::NOT_FOUND
        );
        // Directory with trailing slash but no index
        assert_eq!(
            request(&root, Method::GET, "/pkg/").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_traversal_forbidden() {
        let (_dir, root) = scratch_root();
        assert_eq!(
            request(&root, Method::GET, "/../../etc/passwd").await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            request(&root, Method::GET, "/%2e%2e/%2e%2e/etc/passwd").await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_forbidden() {
        let (_dir, root) = scratch_root();
        let outside = tempdir().expect("failed to create temp directory");
        let secret = outside.path().join("secret.txt");
        fs::write(&secret, "secret").unwrap();
        std::os::unix::fs::symlink(&secret, root.path().join("leak.txt")).unwrap();

        assert_eq!(
            request(&root, Method::GET, "/leak.txt").await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_explicit_port_conflict_is_fatal() {
        let taken = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], 0))).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = bind_first_free(&[port], false).await;
        assert!(matches!(result, Err(ServerError::Bind { port: p, .. }) if p == port));
    }

    #[tokio::test]
    async fn test_random_ports_exhausted() {
        let taken = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], 0))).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = bind_first_free(&[port; MAX_BIND_ATTEMPTS], true).await;
        assert!(matches!(result, Err(ServerError::Exhausted(MAX_BIND_ATTEMPTS))));
    }

    #[tokio::test]
    async fn test_bind_random_port() {
        let mut rng = Pcg32::seed_from_u64(11);
        let listener = bind(None, &mut rng).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!((MIN_PORT..=MAX_PORT).contains(&port));
    }

    #[test]
    fn test_asset_root_removed_with_guard() {
        let (dir, root) = scratch_root();
        let path = root.path().to_path_buf();
        assert!(path.join("index.html").is_file());
        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_root_must_exist() {
        let dir = tempdir().expect("failed to create temp directory");
        let missing = dir.path().join("no-such-root");
        assert!(matches!(AssetRoot::new(missing), Err(ServerError::Root { .. })));
    }
}
