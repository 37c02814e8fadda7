const COMMANDS: &[&str] = &[
    "start_camera",
    "stop_camera",
    "switch_camera",
    "take_photo",
    "get_available_cameras",
    "request_camera_permission",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
