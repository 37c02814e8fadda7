use crate::config::Config;
use crate::error::{Error, Result};
use crate::frame::{to_rgb, RGB_FORMAT};
use crate::models::{permission_denied, CameraInfo, PhotoResponse, StartCameraResponse};
use crate::policy::{select_fps_range, select_photo_size, Enhancements, FpsRange};
use crate::resolution::Resolution;
use crate::session::{pick_device, CameraSession, Facing, OpenRequest, SessionState, StreamPlan};
use crabcamera::init::initialize_camera_system;
use crabcamera::types::{CameraControls, WhiteBalance};
use crabcamera::{
    capture_single_photo, check_camera_permission_status, get_available_cameras,
    request_camera_permission, set_camera_controls, start_camera_preview, stop_camera_preview,
    CameraDeviceInfo, CameraFormat,
};
use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Runtime};
use tokio::sync::{Mutex as AsyncMutex, OnceCell};

pub fn init<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    _api: PluginApi<R, C>,
    config: Config,
) -> Result<CameraCapture<R>> {
    Ok(CameraCapture {
        config,
        initialized: OnceCell::new(),
        state: AsyncMutex::new(SessionState::default()),
        _runtime: std::marker::PhantomData,
    })
}

/// Access to the camera APIs.
pub struct CameraCapture<R: Runtime> {
    config: Config,
    initialized: OnceCell<String>,
    state: AsyncMutex<SessionState>,
    _runtime: std::marker::PhantomData<fn() -> R>,
}

impl<R: Runtime> CameraCapture<R> {
    /// Request camera permission from the system
    pub async fn request_permission(&self) -> Result<serde_json::Value> {
        let info = request_camera_permission()
            .await
            .map_err(|e| Error::CameraError(format!("Failed to request camera permission: {}", e)))?;
        Ok(serde_json::to_value(info)?)
    }

    /// List all available camera devices with the sizes they can stream at
    pub async fn get_available_cameras(&self) -> Result<Vec<CameraInfo>> {
        let devices = self.devices().await?;
        Ok(devices
            .iter()
            .enumerate()
            .map(|(index, device)| CameraInfo {
                id: device.id.clone(),
                name: device.name.clone(),
                facing: Facing::from_index(index),
                resolutions: catalog_of(device),
                fps_ranges: device
                    .supports_formats
                    .iter()
                    .map(fps_range_of)
                    .collect(),
            })
            .collect())
    }

    pub async fn start_camera(&self) -> Result<StartCameraResponse> {
        self.open(OpenRequest::Start).await
    }

    pub async fn switch_camera(&self) -> Result<StartCameraResponse> {
        self.open(OpenRequest::Switch).await
    }

    pub async fn stop_camera(&self) -> Result<()> {
        if let Some(session) = self.state.lock().await.take() {
            close(&session).await;
        }
        Ok(())
    }

    pub async fn take_photo(&self) -> Result<PhotoResponse> {
        let state = self.state.lock().await;
        let session = state.current()?;

        let devices = self.devices().await?;
        let catalog = devices
            .iter()
            .find(|device| device.id == session.device_id)
            .map(catalog_of)
            .unwrap_or_default();
        let size = select_photo_size(&catalog, self.config.photo_fallback);
        log::debug!("Capturing photo at {} from {}", size, session.device_id);

        let format = CameraFormat::new(size.width, size.height, self.config.preferred_fps as f32);
        let frame = capture_single_photo(Some(session.device_id.clone()), Some(format))
            .await
            .map_err(|e| Error::PhotoCapture(e.to_string()))?;

        let data = to_rgb(&frame.format, frame.data, frame.width, frame.height)?;
        Ok(PhotoResponse {
            width: frame.width,
            height: frame.height,
            format: RGB_FORMAT.to_string(),
            data,
        })
    }

    async fn devices(&self) -> Result<Vec<CameraDeviceInfo>> {
        self.initialized
            .get_or_try_init(|| async {
                initialize_camera_system().await.map_err(|e| {
                    Error::CameraError(format!("Failed to initialize camera system: {}", e))
                })
            })
            .await?;

        get_available_cameras()
            .await
            .map_err(|e| Error::CameraError(format!("Failed to list devices: {}", e)))
    }

    async fn ensure_permission(&self) -> Result<()> {
        let status = check_camera_permission_status()
            .await
            .map_err(|e| Error::CameraError(format!("Failed to check camera permission: {}", e)))?;
        if permission_denied(&serde_json::to_value(status)?) {
            return Err(Error::PermissionDenied);
        }
        Ok(())
    }

    /// Open the lens `request` resolves to, replacing whatever session is
    /// running. The lock is held for the whole sequence.
    async fn open(&self, request: OpenRequest) -> Result<StartCameraResponse> {
        let mut state = self.state.lock().await;
        let facing = state.next_facing(request);

        self.ensure_permission().await?;
        let devices = self.devices().await?;
        let device = pick_device(&devices, facing).ok_or(Error::NoCamera(facing))?;

        if let Some(previous) = state.take() {
            close(&previous).await;
        }

        let catalog = catalog_of(device);
        let resolution = self.config.selection_policy().select(&catalog);
        let fps_ranges: Vec<FpsRange> = device
            .supports_formats
            .iter()
            .filter(|format| Resolution::new(format.width, format.height) == resolution)
            .map(fps_range_of)
            .collect();
        let plan = StreamPlan {
            resolution,
            fps: select_fps_range(&fps_ranges, self.config.preferred_fps),
        };
        log::debug!("Selected preview size: {}", plan.resolution);

        let fps = plan.fps.map(|range| range.max).unwrap_or(self.config.preferred_fps);
        let format = CameraFormat::new(resolution.width, resolution.height, fps as f32);
        start_camera_preview(device.id.clone(), Some(format))
            .await
            .map_err(|e| Error::ConfigFailed(format!("Failed to start camera preview: {}", e)))?;

        let mut session = CameraSession::new(device.id.clone(), facing, plan);
        session.enhanced = enhance(&session.device_id, Enhancements::for_facing(facing)).await;
        log::info!(
            "Opened {} camera {} at {} (session {})",
            facing,
            session.device_id,
            resolution,
            session.session_id
        );
        let response = StartCameraResponse::from(&session);
        state.replace(session);
        Ok(response)
    }
}

/// Apply the quality checklist. Unsupported controls only degrade quality.
async fn enhance(device_id: &str, settings: Enhancements) -> bool {
    let controls = CameraControls {
        auto_focus: Some(settings.continuous_auto_focus),
        auto_exposure: Some(settings.auto_exposure),
        white_balance: settings.auto_white_balance.then_some(WhiteBalance::Auto),
        noise_reduction: Some(settings.high_quality_noise_reduction),
        image_stabilization: Some(settings.stabilization()),
        ..Default::default()
    };
    match set_camera_controls(device_id.to_string(), controls).await {
        Ok(_) => {
            log::debug!("Applied enhanced camera settings to {}", device_id);
            true
        }
        Err(e) => {
            log::warn!("Some camera settings not supported on {}: {}", device_id, e);
            false
        }
    }
}

async fn close(session: &CameraSession) {
    match stop_camera_preview(session.device_id.clone()).await {
        Ok(_) => log::info!("Closed camera session {}", session.session_id),
        Err(e) => log::error!("Error stopping camera {}: {}", session.device_id, e),
    }
}

fn catalog_of(device: &CameraDeviceInfo) -> Vec<Resolution> {
    device
        .supports_formats
        .iter()
        .map(|format| Resolution::new(format.width, format.height))
        .collect()
}

fn fps_range_of(format: &CameraFormat) -> FpsRange {
    FpsRange::fixed(format.fps.round() as u32)
}
