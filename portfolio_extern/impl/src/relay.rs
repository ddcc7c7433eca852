use std::sync::Arc;

use anyhow::{anyhow, Context};
use portfolio_extern_contracts::relay::MessageRelayApiService;
use portfolio_models::{
    contact::FormFields,
    relay::{RelayPublicKey, RelayServiceId, RelayTemplateId},
};
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::http::HttpClient;

pub const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Relays contact form messages through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    pub service_id: RelayServiceId,
    pub template_id: RelayTemplateId,
    pub public_key: RelayPublicKey,
    endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(
        service_id: RelayServiceId,
        template_id: RelayTemplateId,
        public_key: RelayPublicKey,
        endpoint_override: Option<Url>,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => SEND_ENDPOINT.parse().context("Invalid EmailJS endpoint")?,
        };

        Ok(Self {
            service_id,
            template_id,
            public_key,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(config: EmailJsApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl MessageRelayApiService for EmailJsApiServiceImpl {
    #[instrument(skip_all, fields(endpoint = %self.config.endpoint))]
    async fn send(&self, fields: &FormFields) -> anyhow::Result<()> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SendRequest {
                service_id: &self.config.service_id,
                template_id: &self.config.template_id,
                user_id: &self.config.public_key,
                template_params: fields,
            })
            .send()
            .await
            .context("Failed to reach EmailJS")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("EmailJS rejected the message ({status}): {text}"));
        }

        debug!(%status, "message accepted");
        Ok(())
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a FormFields,
}
