use serde::{Deserialize, Serialize};

use crate::policy::{quality_label, Enhancements, FpsRange};
use crate::resolution::Resolution;
use crate::session::{CameraSession, Facing};

// Returned by start_camera and switch_camera
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCameraResponse {
    pub session_id: String,
    pub device_id: String,
    pub is_back_camera: bool,
    pub width: u32,
    pub height: u32,
    pub fps: Option<FpsRange>,
    pub quality: String,
}

impl From<&CameraSession> for StartCameraResponse {
    fn from(session: &CameraSession) -> Self {
        Self {
            session_id: session.session_id.clone(),
            device_id: session.device_id.clone(),
            is_back_camera: session.facing.is_back(),
            width: session.plan.resolution.width,
            height: session.plan.resolution.height,
            fps: session.plan.fps,
            quality: quality_label(session.enhanced).to_string(),
        }
    }
}

// Still photo sent to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub width: u32,
    pub height: u32,
    pub format: String,
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}

// A camera and the sizes it can stream at
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    pub id: String,
    pub name: String,
    pub facing: Option<Facing>,
    pub resolutions: Vec<Resolution>,
    pub fps_ranges: Vec<FpsRange>,
}

// Capabilities reported by the native mobile plugin for one lens
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraCapabilities {
    /// Absent when the device has no lens facing the requested way.
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub preview_sizes: Vec<Resolution>,
    #[serde(default)]
    pub photo_sizes: Vec<Resolution>,
    #[serde(default)]
    pub fps_ranges: Vec<FpsRange>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacingRequest {
    pub facing: Facing,
}

// Sent to the native mobile plugin to open a lens with the chosen plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCameraRequest {
    pub device_id: String,
    pub facing: Facing,
    pub width: u32,
    pub height: u32,
    pub fps: Option<FpsRange>,
    pub enhancements: Enhancements,
}

// Native acknowledgement of a startCamera call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenCameraResponse {
    pub enhanced: bool,
}

/// Whether a permission answer from the host denies camera access.
///
/// Only an explicit denial counts; an undetermined status is left for the
/// platform to prompt on open.
pub fn permission_denied(info: &serde_json::Value) -> bool {
    let status = info
        .get("status")
        .and_then(serde_json::Value::as_str)
        .or_else(|| info.as_str())
        .unwrap_or_default();
    matches!(
        status.to_ascii_lowercase().as_str(),
        "denied" | "restricted"
    )
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakePhotoRequest {
    pub device_id: String,
    pub width: u32,
    pub height: u32,
}
