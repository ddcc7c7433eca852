use portfolio_config::RelayConfig;
use portfolio_core_contact_contracts::notice::ContactNoticeService;
use portfolio_core_contact_impl::ContactFormServiceImpl;
use portfolio_extern_impl::{
    http::HttpClient,
    relay::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
};

pub type ContactForm<Notice> = ContactFormServiceImpl<EmailJsApiServiceImpl, Notice>;

/// Wires a contact form that relays messages through EmailJS.
pub fn contact_form<Notice>(
    config: RelayConfig,
    notice: Notice,
) -> anyhow::Result<ContactForm<Notice>>
where
    Notice: ContactNoticeService,
{
    let RelayConfig {
        service_id,
        template_id,
        public_key,
        endpoint_override,
        timeout,
    } = config;

    let client = HttpClient::new(timeout.map(Into::into))?;
    let relay_config =
        EmailJsApiServiceConfig::new(service_id, template_id, public_key, endpoint_override)?;
    let relay = EmailJsApiServiceImpl::new(relay_config, client);

    Ok(ContactFormServiceImpl::new(relay, notice))
}
