//! Camera preview, lens switching and still capture for Tauri apps.
//!
//! Desktop targets drive cameras through `crabcamera`. On Android and iOS the
//! plugin only plans the stream (resolution, frame rate, quality settings) and
//! forwards to a native half that this crate does not ship: the host app must
//! provide the Android class `app.tauri.cameracapture.CameraCapturePlugin`
//! and, on iOS, a Swift plugin exporting `init_plugin_camera_capture`. That
//! native half answers `getCapabilities`, `startCamera`, `stopCamera`,
//! `takePhoto` and `requestPermission`, rejecting with `PERMISSION_DENIED`
//! when access is refused.

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

pub use models::*;

#[cfg(desktop)]
mod desktop;
#[cfg(desktop)]
mod frame;
#[cfg(mobile)]
mod mobile;

mod commands;
mod config;
mod error;
mod models;
pub mod policy;
pub mod resolution;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use resolution::{select, Resolution, SelectionPolicy};

#[cfg(desktop)]
use desktop::CameraCapture;
#[cfg(mobile)]
use mobile::CameraCapture;

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the camera APIs.
pub trait CameraCaptureExt<R: Runtime> {
    fn camera_capture(&self) -> &CameraCapture<R>;
}

impl<R: Runtime, T: Manager<R>> crate::CameraCaptureExt<R> for T {
    fn camera_capture(&self) -> &CameraCapture<R> {
        self.state::<CameraCapture<R>>().inner()
    }
}

/// Initializes the plugin.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
    Builder::<R, Option<Config>>::new("camera-capture")
        .invoke_handler(tauri::generate_handler![
            commands::start_camera,
            commands::stop_camera,
            commands::switch_camera,
            commands::take_photo,
            commands::get_available_cameras,
            commands::request_camera_permission,
        ])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            log::debug!("Camera capture config: {:?}", config);
            #[cfg(mobile)]
            let camera = mobile::init(app, api, config)?;
            #[cfg(desktop)]
            let camera = desktop::init(app, api, config)?;
            app.manage(camera);
            Ok(())
        })
        .build()
}
