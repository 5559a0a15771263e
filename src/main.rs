use log::{info, warn};
use room_relay::config::RelayConfig;
use room_relay::server::{routes, Server};
use room_relay::tls::check_tls_files;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = RelayConfig::default();
    let server = Server::new(config.clone());
    let routes = routes(server, &config.public_dir);

    match check_tls_files(&config.tls) {
        Ok(()) => {
            info!("Starting secure server (HTTPS/WSS) on {}", config.bind_addr);
            warp::serve(routes)
                .tls()
                .cert_path(&config.tls.cert_path)
                .key_path(&config.tls.key_path)
                .run(config.bind_addr)
                .await;
        }
        Err(e) => {
            warn!("TLS unavailable ({}), falling back to HTTP/WS", e);
            info!("Server running at http://{}", config.bind_addr);
            warp::serve(routes).run(config.bind_addr).await;
        }
    }
}
