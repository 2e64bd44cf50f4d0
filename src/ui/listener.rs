/// Capability the owning host hands to the progress controller
///
/// Held by the controller only while its session is in the foreground.
#[cfg_attr(test, mockall::automock)]
pub trait CreationListener: Send + Sync {
    /// The site was created. Called exactly once per creation session.
    fn creation_success(&self);

    /// The user asked for help from the progress screen
    fn help_requested(&self);
}
