use crate::config::{Config, ServerConfig};
use crate::error::FrameworkError;
use crate::http::{collect_body, HttpResponse, Request};
use crate::kernel::Kernel;
use crate::routing::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::net::TcpListener;

/// HTTP/1 server, one task per connection
pub struct Server {
    kernel: Kernel,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Server {
    pub fn new(kernel: Kernel, config: ServerConfig) -> Self {
        Self {
            kernel,
            host: config.host,
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }

    /// Server for `router` with global middleware and the registered
    /// `ServerConfig`
    pub fn from_config(router: Router) -> Self {
        let config = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
        Self::new(Kernel::from_global(router), config)
    }

    fn addr(&self) -> Result<SocketAddr, FrameworkError> {
        let ip = self.host.parse().map_err(|e| {
            FrameworkError::internal(format!("Invalid SERVER_HOST '{}': {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Accept connections until Ctrl-C
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("listening on http://{}", addr);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = &mut shutdown => {
                    tracing::info!("shutting down");
                    return Ok(());
                }
            };

            let kernel = self.kernel.clone();
            let limit = self.max_body_size;
            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let kernel = kernel.clone();
                    async move { Ok::<_, Infallible>(dispatch(kernel, req, limit).await) }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    tracing::warn!(%peer, error = %err, "connection error");
                }
            });
        }
    }
}

async fn dispatch(
    kernel: Kernel,
    req: hyper::Request<Incoming>,
    limit: usize,
) -> hyper::Response<Full<Bytes>> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let response = match collect_body(body, limit).await {
        Ok(bytes) => {
            let request = Request::new(http::Request::from_parts(parts, bytes));
            kernel.handle(request).await
        }
        Err(err) => {
            tracing::warn!(path = %parts.uri.path(), error = %err, "unreadable request body");
            HttpResponse::from(err)
        }
    };

    tracing::trace!(elapsed = ?started.elapsed(), status = response.status_code(), "dispatched");
    response.into_hyper()
}
