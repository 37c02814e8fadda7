//! Normalisation of captured frames to packed RGB24.

use yuv::{YuvBiPlanarImage, YuvConversionMode, YuvPlanarImage, YuvRange, YuvStandardMatrix};

use crate::error::{Error, Result};

pub const RGB_FORMAT: &str = "RGB8";

/// Convert a frame in one of the formats the capture backend emits to RGB24.
pub fn to_rgb(format: &str, data: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    match format {
        RGB_FORMAT => {
            let expected = width as usize * height as usize * 3;
            if data.len() < expected {
                return Err(Error::InvalidFrame(format!(
                    "RGB buffer too small: expected at least {}, got {}",
                    expected,
                    data.len()
                )));
            }
            Ok(data)
        }
        "YUV" | "I420" => i420_to_rgb(&data, width, height),
        "NV12" => nv12_to_rgb(&data, width, height),
        other => {
            log::error!("Unsupported frame format: {}", other);
            Err(Error::InvalidFrame(format!(
                "Unsupported frame format: {}",
                other
            )))
        }
    }
}

fn matrix_for(width: u32, height: u32) -> YuvStandardMatrix {
    if width >= 1280 || height >= 720 {
        YuvStandardMatrix::Bt709
    } else {
        YuvStandardMatrix::Bt601
    }
}

fn check_420_size(data: &[u8], width: u32, height: u32) -> Result<usize> {
    let y_plane_size = width as usize * height as usize;
    let expected = y_plane_size * 3 / 2;
    if data.len() < expected {
        return Err(Error::InvalidFrame(format!(
            "YUV buffer too small: expected at least {}, got {}",
            expected,
            data.len()
        )));
    }
    Ok(y_plane_size)
}

/// Planar Y, U, V (I420).
pub fn i420_to_rgb(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let y_plane_size = check_420_size(data, width, height)?;
    let chroma_size = y_plane_size / 4;
    let v_offset = y_plane_size + chroma_size;

    let image = YuvPlanarImage {
        y_plane: &data[..y_plane_size],
        y_stride: width,
        u_plane: &data[y_plane_size..v_offset],
        u_stride: width / 2,
        v_plane: &data[v_offset..v_offset + chroma_size],
        v_stride: width / 2,
        width,
        height,
    };

    let mut rgb = vec![0u8; y_plane_size * 3];
    yuv::yuv420_to_rgb(
        &image,
        &mut rgb,
        width * 3,
        YuvRange::Limited,
        matrix_for(width, height),
    )
    .map_err(|e| Error::InvalidFrame(format!("I420 to RGB conversion failed: {:?}", e)))?;

    Ok(rgb)
}

/// Y plane followed by interleaved UV (NV12).
pub fn nv12_to_rgb(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let y_plane_size = check_420_size(data, width, height)?;

    let image = YuvBiPlanarImage {
        y_plane: &data[..y_plane_size],
        y_stride: width,
        uv_plane: &data[y_plane_size..],
        uv_stride: width,
        width,
        height,
    };

    let mut rgb = vec![0u8; y_plane_size * 3];
    yuv::yuv_nv12_to_rgb(
        &image,
        &mut rgb,
        width * 3,
        YuvRange::Limited,
        matrix_for(width, height),
        YuvConversionMode::Fast,
    )
    .map_err(|e| Error::InvalidFrame(format!("NV12 to RGB conversion failed: {:?}", e)))?;

    Ok(rgb)
}
