use tauri::{command, AppHandle, Runtime};

use crate::models::*;
use crate::CameraCaptureExt;
use crate::Result;

/// Open the back camera at the best supported preview size
#[command]
pub(crate) async fn start_camera<R: Runtime>(app: AppHandle<R>) -> Result<StartCameraResponse> {
    app.camera_capture().start_camera().await
}

#[command]
pub(crate) async fn stop_camera<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    app.camera_capture().stop_camera().await
}

/// Reopen with the opposite lens
#[command]
pub(crate) async fn switch_camera<R: Runtime>(app: AppHandle<R>) -> Result<StartCameraResponse> {
    app.camera_capture().switch_camera().await
}

#[command]
pub(crate) async fn take_photo<R: Runtime>(app: AppHandle<R>) -> Result<PhotoResponse> {
    app.camera_capture().take_photo().await
}

#[command]
pub(crate) async fn get_available_cameras<R: Runtime>(
    app: AppHandle<R>,
) -> Result<Vec<CameraInfo>> {
    app.camera_capture().get_available_cameras().await
}

#[command]
pub(crate) async fn request_camera_permission<R: Runtime>(
    app: AppHandle<R>,
) -> Result<serde_json::Value> {
    app.camera_capture().request_permission().await
}
