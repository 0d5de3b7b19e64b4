// src/device/mod.rs

use std::path::Path;
use std::process::Command;

const NVIDIA_DRIVER_VERSION: &str = "/proc/driver/nvidia/version";

/// Answers whether GPU acceleration is usable on this host.
pub trait DeviceProbe {
    fn gpu_available(&self) -> bool;
}

/// Checks the real host: CUDA visibility, then the NVIDIA driver or `nvidia-smi`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl DeviceProbe for SystemProbe {
    fn gpu_available(&self) -> bool {
        if !cuda_devices_visible(std::env::var("CUDA_VISIBLE_DEVICES").ok().as_deref()) {
            tracing::debug!("CUDA_VISIBLE_DEVICES hides every device");
            return false;
        }

        if Path::new(NVIDIA_DRIVER_VERSION).exists() {
            return true;
        }

        match Command::new("nvidia-smi").arg("-L").output() {
            Ok(out) => out.status.success() && !out.stdout.is_empty(),
            Err(e) => {
                tracing::debug!("nvidia-smi unavailable: {e}");
                false
            }
        }
    }
}

/// `CUDA_VISIBLE_DEVICES=""` and `-1` both disable every device.
fn cuda_devices_visible(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some("") | Some("-1") => false,
        Some(_) => true,
    }
}
