use serde::{ser::SerializeStruct, ser::Serializer, Serialize};

use crate::session::Facing;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[cfg(mobile)]
  #[error(transparent)]
  PluginInvoke(#[from] tauri::plugin::mobile::PluginInvokeError),
  #[error("Camera permission not granted")]
  PermissionDenied,
  #[error("No {0} camera found")]
  NoCamera(Facing),
  #[error("Camera not initialized")]
  CameraNotReady,
  #[error("Camera error: {0}")]
  CameraError(String),
  #[error("Camera session config failed: {0}")]
  ConfigFailed(String),
  #[error("Failed to capture photo: {0}")]
  PhotoCapture(String),
  #[error("Invalid frame: {0}")]
  InvalidFrame(String),
}

impl Error {
  /// Stable code the frontend matches on.
  pub fn code(&self) -> &'static str {
    match self {
      Error::Io(_) => "IO_ERROR",
      Error::Json(_) => "JSON_ERROR",
      #[cfg(mobile)]
      Error::PluginInvoke(_) => "PLUGIN_INVOKE_ERROR",
      Error::PermissionDenied => "PERMISSION_DENIED",
      Error::NoCamera(_) => "NO_CAMERA",
      Error::CameraNotReady => "CAMERA_NOT_READY",
      Error::CameraError(_) => "CAMERA_ERROR",
      Error::ConfigFailed(_) => "CONFIG_FAILED",
      Error::PhotoCapture(_) => "PHOTO_CAPTURE_ERROR",
      Error::InvalidFrame(_) => "INVALID_FRAME",
    }
  }
}

impl Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut state = serializer.serialize_struct("Error", 2)?;
    state.serialize_field("code", self.code())?;
    state.serialize_field("message", &self.to_string())?;
    state.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serializes_code_and_message() {
    let value = serde_json::to_value(Error::NoCamera(Facing::Front)).unwrap();
    assert_eq!(value["code"], "NO_CAMERA");
    assert_eq!(value["message"], "No front camera found");
  }

  #[test]
  fn test_codes() {
    assert_eq!(Error::PermissionDenied.code(), "PERMISSION_DENIED");
    assert_eq!(Error::CameraNotReady.code(), "CAMERA_NOT_READY");
    assert_eq!(
      Error::PhotoCapture("timeout".into()).code(),
      "PHOTO_CAPTURE_ERROR"
    );
    assert_eq!(
      Error::CameraError("Camera in use".into()).to_string(),
      "Camera error: Camera in use"
    );
  }
}
