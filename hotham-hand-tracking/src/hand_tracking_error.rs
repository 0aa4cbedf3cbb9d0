use openxr::sys::Result as OpenXRResult;
use thiserror::Error;

/// Errors raised at the edges of hand tracking: talking to the XR runtime, or loading
/// configs and recordings. Per-frame updates never fail.
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum HandTrackingError {
    #[error("There was a problem with an OpenXR operation")]
    OpenXRError(#[from] OpenXRResult),
    #[error("The hand tracking extension is not enabled on this instance")]
    UnsupportedExtensionError,
    #[error("Unable to parse JSON")]
    ParseError(#[from] serde_json::Error),
    #[error("The recording has no frames for either hand")]
    EmptyRecording,
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
