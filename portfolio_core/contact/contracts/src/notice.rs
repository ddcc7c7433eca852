/// Shows a notice to the user without leaving the form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactNoticeService: Send + Sync + 'static {
    fn notify_failure(&self, notice: &str);
}

#[cfg(feature = "mock")]
impl MockContactNoticeService {
    pub fn with_notify_failure(mut self, notice: impl Into<String>) -> Self {
        self.expect_notify_failure()
            .once()
            .with(mockall::predicate::eq(notice.into()))
            .return_const(());
        self
    }
}
