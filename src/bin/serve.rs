//! Static file server for the web build
//!
//! Usage: `laser-switch-serve [port] [root]`. Without a port a random one is
//! picked; the root falls back to `$LASER_SWITCH_ROOT`, then `web`.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    use std::error::Error as _;
    use std::path::PathBuf;
    use std::process::exit;

    use laser_switch::server::{self, AssetRoot, DEFAULT_ROOT, ROOT_ENV};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);

    let port = match args.next() {
        Some(arg) => match server::parse_port(&arg) {
            Ok(port) => Some(port),
            Err(err) => {
                log::error!("{}", err);
                exit(1);
            }
        },
        None => None,
    };

    let root_path = args
        .next()
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(ROOT_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));

    let root = match AssetRoot::new(&root_path) {
        Ok(root) => root,
        Err(err) => {
            match err.source() {
                Some(source) => log::error!("{}: {}", err, source),
                None => log::error!("{}", err),
            }
            exit(1);
        }
    };

    let listener = match server::bind(port, &mut rand::rng()).await {
        Ok(listener) => listener,
        Err(err) => {
            log::error!("Failed to start server: {}", err);
            exit(1);
        }
    };

    let bound = listener.local_addr().map(|addr| addr.port()).unwrap_or_default();
    log::info!("Serving {} at http://localhost:{}", root.path().display(), bound);

    if let Err(err) = axum::serve(listener, server::router(root))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {}", err);
        exit(1);
    }
    log::info!("Server stopped");
}

#[cfg(not(target_arch = "wasm32"))]
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                log::warn!("Could not install SIGTERM handler: {}", err);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
