use serde::de::DeserializeOwned;
use serde::Serialize;
use tauri::{
    plugin::{mobile::PluginInvokeError, PluginApi, PluginHandle},
    AppHandle, Runtime,
};
use tokio::sync::Mutex as AsyncMutex;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::*;
use crate::policy::{select_photo_size, Enhancements};
use crate::session::{plan_stream, CameraSession, Facing, OpenRequest, SessionState};

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_camera_capture);

// The native half is provided by the host application under these names.
#[cfg(target_os = "android")]
const PLUGIN_IDENTIFIER: &str = "app.tauri.cameracapture";
#[cfg(target_os = "android")]
const PLUGIN_CLASS: &str = "CameraCapturePlugin";

pub fn init<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    api: PluginApi<R, C>,
    config: Config,
) -> Result<CameraCapture<R>> {
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin(PLUGIN_IDENTIFIER, PLUGIN_CLASS)?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_camera_capture)?;
    Ok(CameraCapture {
        handle,
        config,
        state: AsyncMutex::new(SessionState::default()),
    })
}

/// Access to the camera APIs.
pub struct CameraCapture<R: Runtime> {
    handle: PluginHandle<R>,
    config: Config,
    state: AsyncMutex<SessionState>,
}

impl<R: Runtime> CameraCapture<R> {
    pub async fn request_permission(&self) -> Result<serde_json::Value> {
        self.invoke("requestPermission", ())
    }

    pub async fn get_available_cameras(&self) -> Result<Vec<CameraInfo>> {
        let mut cameras = Vec::new();
        for facing in [Facing::Back, Facing::Front] {
            match self.capabilities(facing) {
                Ok((device_id, caps)) => cameras.push(CameraInfo {
                    id: device_id,
                    name: format!("{} camera", facing),
                    facing: Some(facing),
                    resolutions: caps.preview_sizes,
                    fps_ranges: caps.fps_ranges,
                }),
                Err(Error::NoCamera(_)) => log::debug!("No {} camera", facing),
                Err(e) => return Err(e),
            }
        }
        Ok(cameras)
    }

    pub async fn start_camera(&self) -> Result<StartCameraResponse> {
        self.open(OpenRequest::Start).await
    }

    pub async fn switch_camera(&self) -> Result<StartCameraResponse> {
        self.open(OpenRequest::Switch).await
    }

    pub async fn stop_camera(&self) -> Result<()> {
        if let Some(session) = self.state.lock().await.take() {
            self.close(&session);
        }
        Ok(())
    }

    pub async fn take_photo(&self) -> Result<PhotoResponse> {
        let state = self.state.lock().await;
        let session = state.current()?;

        let (_, caps) = self.capabilities(session.facing)?;
        let size = select_photo_size(&caps.photo_sizes, self.config.photo_fallback);
        log::debug!("Capturing photo at {} from {}", size, session.device_id);

        self.handle
            .run_mobile_plugin(
                "takePhoto",
                TakePhotoRequest {
                    device_id: session.device_id.clone(),
                    width: size.width,
                    height: size.height,
                },
            )
            .map_err(|e| Error::PhotoCapture(e.to_string()))
    }

    fn invoke<T: DeserializeOwned>(&self, command: &str, payload: impl Serialize) -> Result<T> {
        self.handle
            .run_mobile_plugin(command, payload)
            .map_err(invoke_error)
    }

    /// Capabilities of the lens facing `facing` along with its device id.
    fn capabilities(&self, facing: Facing) -> Result<(String, CameraCapabilities)> {
        let mut caps: CameraCapabilities =
            self.invoke("getCapabilities", FacingRequest { facing })?;
        let device_id = caps.device_id.take().ok_or(Error::NoCamera(facing))?;
        Ok((device_id, caps))
    }

    fn close(&self, session: &CameraSession) {
        match self.handle.run_mobile_plugin::<serde_json::Value>("stopCamera", ()) {
            Ok(_) => log::info!("Closed camera session {}", session.session_id),
            Err(e) => log::error!("Error stopping camera {}: {}", session.device_id, e),
        }
    }

    /// Open the lens `request` resolves to, replacing whatever session is
    /// running. The lock is held for the whole sequence.
    async fn open(&self, request: OpenRequest) -> Result<StartCameraResponse> {
        let mut state = self.state.lock().await;
        let facing = state.next_facing(request);

        let (device_id, caps) = self.capabilities(facing)?;

        if let Some(previous) = state.take() {
            self.close(&previous);
        }

        let plan = plan_stream(&caps.preview_sizes, &caps.fps_ranges, &self.config);
        log::debug!("Selected preview size: {}", plan.resolution);

        let opened: OpenCameraResponse = self.invoke(
            "startCamera",
            OpenCameraRequest {
                device_id: device_id.clone(),
                facing,
                width: plan.resolution.width,
                height: plan.resolution.height,
                fps: plan.fps,
                enhancements: Enhancements::for_facing(facing),
            },
        )?;

        let mut session = CameraSession::new(device_id, facing, plan);
        session.enhanced = opened.enhanced;
        log::info!(
            "Opened {} camera {} at {} (session {})",
            facing,
            session.device_id,
            plan.resolution,
            session.session_id
        );
        let response = StartCameraResponse::from(&session);
        state.replace(session);
        Ok(response)
    }
}

/// The native half rejects with the same codes the frontend sees.
fn invoke_error(error: PluginInvokeError) -> Error {
    match &error {
        PluginInvokeError::InvokeRejected(response)
            if response.code.as_deref() == Some("PERMISSION_DENIED") =>
        {
            Error::PermissionDenied
        }
        _ => error.into(),
    }
}
