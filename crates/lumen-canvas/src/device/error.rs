/// Failure reported by a [`GraphicsDevice`](super::GraphicsDevice) outside
/// shader compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("failed to create {what}: {reason}")]
    Create { what: &'static str, reason: String },
}
