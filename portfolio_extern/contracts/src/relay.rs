use std::future::Future;

use portfolio_models::contact::FormFields;

/// Delivers contact form messages as emails on the site owner's behalf.
///
/// Implementations must not be assumed to retry, to preserve ordering or to
/// be idempotent.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageRelayApiService: Send + Sync + 'static {
    /// Hands the message to the relay. Any error means the message was not
    /// accepted, the reason is only meant for logging.
    fn send(&self, fields: &FormFields) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockMessageRelayApiService {
    pub fn with_send(mut self, fields: FormFields, result: anyhow::Result<()>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(fields))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
