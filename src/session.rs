use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::policy::{select_fps_range, FpsRange};
use crate::resolution::Resolution;

/// Which lens a session streams from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    Back,
    Front,
}

impl Facing {
    pub fn toggled(self) -> Self {
        match self {
            Facing::Back => Facing::Front,
            Facing::Front => Facing::Back,
        }
    }

    pub fn is_back(self) -> bool {
        self == Facing::Back
    }

    /// Lens of the device at `index` in enumeration order, for devices
    /// that carry no lens metadata.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Facing::Back),
            1 => Some(Facing::Front),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Facing::Back => 0,
            Facing::Front => 1,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Back => f.write_str("back"),
            Facing::Front => f.write_str("front"),
        }
    }
}

/// Stream dimensions and frame rate decided before a camera is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPlan {
    pub resolution: Resolution,
    pub fps: Option<FpsRange>,
}

pub fn plan_stream(catalog: &[Resolution], fps_ranges: &[FpsRange], config: &Config) -> StreamPlan {
    StreamPlan {
        resolution: config.selection_policy().select(catalog),
        fps: select_fps_range(fps_ranges, config.preferred_fps),
    }
}

/// Devices without lens metadata are mapped by enumeration order: the first
/// is the back camera, the second the front one.
pub fn pick_device<T>(devices: &[T], facing: Facing) -> Option<&T> {
    devices.get(facing.index())
}

/// An open camera. Owned by the session manager while the camera runs.
#[derive(Debug, Clone)]
pub struct CameraSession {
    pub session_id: String,
    pub device_id: String,
    pub facing: Facing,
    pub plan: StreamPlan,
    /// Whether the quality enhancements were accepted by the device.
    pub enhanced: bool,
}

impl CameraSession {
    pub fn new(device_id: String, facing: Facing, plan: StreamPlan) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            device_id,
            facing,
            plan,
            enhanced: false,
        }
    }
}

/// How a command picks the lens to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenRequest {
    /// Always the back camera.
    Start,
    /// The lens opposite to the last one opened.
    Switch,
}

/// Everything a session manager guards behind its lock.
///
/// `facing` remembers the last lens that opened successfully and survives
/// `take`, so a switch after a stop still toggles from that lens.
#[derive(Debug, Default)]
pub struct SessionState {
    session: Option<CameraSession>,
    facing: Facing,
}

impl SessionState {
    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn next_facing(&self, request: OpenRequest) -> Facing {
        match request {
            OpenRequest::Start => Facing::Back,
            OpenRequest::Switch => self.facing.toggled(),
        }
    }

    /// The running session, or `CAMERA_NOT_READY`.
    pub fn current(&self) -> Result<&CameraSession> {
        self.session.as_ref().ok_or(Error::CameraNotReady)
    }

    /// Install a freshly opened session, returning the one it replaces.
    pub fn replace(&mut self, session: CameraSession) -> Option<CameraSession> {
        self.facing = session.facing;
        self.session.replace(session)
    }

    /// Remove the running session. Safe to call when nothing runs.
    pub fn take(&mut self) -> Option<CameraSession> {
        self.session.take()
    }
}
