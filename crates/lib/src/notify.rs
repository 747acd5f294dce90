use std::fmt::Debug;

/// The message shown to the user when a generation attempt fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Generation failed, please retry";

/// A sink for blocking, user-visible alerts.
///
/// The handler never passes error details through here; those go to the log.
pub trait Notifier: Send + Sync + Debug {
    fn alert(&self, message: &str);
}

/// A notifier that drops every alert.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn alert(&self, _message: &str) {}
}
