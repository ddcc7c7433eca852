use portfolio_core_contact_contracts::notice::ContactNoticeService;

/// Prints contact form notices to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNoticeService;

impl ContactNoticeService for StderrNoticeService {
    fn notify_failure(&self, notice: &str) {
        eprintln!("{notice}");
    }
}
