use salvo::conn::rustls::{Keycert, RustlsConfig};
use salvo::prelude::*;
use salvo::server::ServerHandle;
use tokio::signal;
use tracing::info;

mod application;
mod hoops;
mod infrastructure;
mod interface;
mod models;
mod routers;
mod utils;

use crate::infrastructure::config;
use crate::infrastructure::i18n::init_i18n;

#[tokio::main]
async fn main() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");
    config::init();
    let config = config::get();

    let _guard = crate::infrastructure::log::init(&config.log);
    info!("log level: {}", &config.log.filter_level);

    let resolver = match config.i18n.resolver() {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Invalid [i18n] config: {e}");
            std::process::exit(1);
        }
    };
    info!(
        default = %resolver.default_locale(),
        supported = ?resolver.supported(),
        "locales configured"
    );
    init_i18n(resolver);

    if config.jwt.dev_sessions {
        tracing::warn!("dev sessions are enabled: POST /api/dev/session mints tokens");
    }

    let service = routers::service();
    println!("🔄 listen on {}", &config.listen_addr);

    if let Some(tls) = &config.tls {
        let (cert, key) = match (std::fs::read(&tls.cert), std::fs::read(&tls.key)) {
            (Ok(cert), Ok(key)) => (cert, key),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Failed to read TLS cert/key: {e}");
                std::process::exit(1);
            }
        };
        println!(
            "📖 Open API Page: https://{}/scalar",
            config.listen_addr.replace("0.0.0.0", "127.0.0.1")
        );
        let rustls = RustlsConfig::new(Keycert::new().cert(cert).key(key));
        let acceptor = TcpListener::new(&config.listen_addr).rustls(rustls).bind().await;
        let server = Server::new(acceptor);
        tokio::spawn(shutdown_signal(server.handle()));
        server.serve(service).await;
    } else {
        println!(
            "📖 Open API Page: http://{}/scalar",
            config.listen_addr.replace("0.0.0.0", "127.0.0.1")
        );
        let acceptor = TcpListener::new(&config.listen_addr).bind().await;
        let server = Server::new(acceptor);
        tokio::spawn(shutdown_signal(server.handle()));
        server.serve(service).await;
    }
}

async fn shutdown_signal(handle: ServerHandle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("ctrl_c signal received"),
        _ = terminate => info!("terminate signal received"),
    }
    handle.stop_graceful(std::time::Duration::from_secs(60));
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};

    use crate::infrastructure::config;
    use crate::infrastructure::i18n::init_i18n;

    #[tokio::test]
    async fn test_health() {
        config::init();
        init_i18n(config::get().i18n.resolver().unwrap());

        let content = TestClient::get(format!(
            "http://{}/health",
            config::get().listen_addr.replace("0.0.0.0", "127.0.0.1")
        ))
        .send(&crate::routers::service())
        .await
        .take_string()
        .await
        .unwrap();
        assert_eq!(content, r#"{"status":"ok"}"#);
    }
}
