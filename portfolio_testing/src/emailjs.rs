use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Template parameters every contact message has to provide.
const REQUIRED_PARAMS: [&str; 3] = ["name", "email", "message"];

/// Message that makes the server answer with an internal error.
pub const FAIL_MESSAGE: &str = "fail";
/// Message that makes the server wait [`SLOW_DELAY`] before answering.
pub const SLOW_MESSAGE: &str = "slow";
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// A message the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub template_params: HashMap<String, String>,
}

/// An EmailJS look-alike that records accepted messages.
#[derive(Debug, Clone)]
pub struct MockEmailJs {
    credentials: Arc<EmailJsCredentials>,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl MockEmailJs {
    pub fn new(credentials: EmailJsCredentials) -> Self {
        Self {
            credentials: credentials.into(),
            deliveries: Default::default(),
        }
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serves the mock on an ephemeral localhost port in the background and
    /// returns its address.
    pub async fn spawn(&self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind to localhost")?;
        let addr = listener.local_addr()?;
        let router = self.router();
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                warn!("EmailJS testing server stopped: {err}");
            }
        });
        Ok(addr)
    }

    fn check(&self, request: &SendRequest) -> Result<(), (StatusCode, String)> {
        let credentials = &*self.credentials;
        let bad_request = |text: &str| Err((StatusCode::BAD_REQUEST, text.to_owned()));

        if request.user_id != credentials.public_key {
            return bad_request("The Public Key is invalid");
        }
        if request.service_id != credentials.service_id {
            return bad_request("The service ID is invalid");
        }
        if request.template_id != credentials.template_id {
            return bad_request("The template ID is invalid");
        }
        if let Some(param) = REQUIRED_PARAMS
            .into_iter()
            .find(|&param| !request.template_params.contains_key(param))
        {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("The template parameter {param:?} is missing"),
            ));
        }
        Ok(())
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: EmailJsCredentials,
) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("EmailJS send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Credentials: {credentials:?}");
    info!(
        "Messages are accepted, except for the message {FAIL_MESSAGE:?} which fails and \
         {SLOW_MESSAGE:?} which is answered after {SLOW_DELAY:?}"
    );

    let router = MockEmailJs::new(credentials).router();

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(default)]
    template_params: HashMap<String, String>,
}

async fn send(
    State(mock): State<MockEmailJs>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, String) {
    if let Err(rejection) = mock.check(&request) {
        return rejection;
    }

    match request.template_params.get("message").map(String::as_str) {
        Some(FAIL_MESSAGE) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into());
        }
        Some(SLOW_MESSAGE) => tokio::time::sleep(SLOW_DELAY).await,
        _ => {}
    }

    mock.deliveries
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Delivery {
            template_params: request.template_params,
        });

    (StatusCode::OK, "OK".into())
}
