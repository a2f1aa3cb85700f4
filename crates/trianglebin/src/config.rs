//! Start-up configuration.
//!
//! Everything has a default; the environment may override the fault policy
//! (`TRIANGLEBIN_FAULT_POLICY`) and the log filter (`RUST_LOG`, read by the
//! logger itself).

use trianglebin_engine::device::GpuInit;
use trianglebin_engine::fault::{FaultPolicy, FaultPolicyParseError};
use trianglebin_engine::logging::LoggingConfig;
use trianglebin_engine::window::RuntimeConfig;

pub const FAULT_POLICY_VAR: &str = "TRIANGLEBIN_FAULT_POLICY";

/// System fonts tried in order for the panel text.
pub const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub fault_policy: FaultPolicy,
}

impl AppConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, FaultPolicyParseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FaultPolicyParseError> {
        let mut config = Self::default();
        if let Some(policy) = lookup(FAULT_POLICY_VAR) {
            config.fault_policy = policy.parse()?;
        }
        Ok(config)
    }
}

/// Reads the first font in `FONT_PATHS` that exists.
pub fn load_system_font() -> Option<(&'static str, Vec<u8>)> {
    FONT_PATHS
        .iter()
        .find_map(|&path| std::fs::read(path).ok().map(|bytes| (path, bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_window_contract() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.window.title, "trianglebin");
        assert_eq!(config.window.initial_size.width, 1280.0);
        assert_eq!(config.window.initial_size.height, 720.0);
        assert_eq!(config.fault_policy, FaultPolicy::Prompt);
        assert_eq!(config.gpu.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn fault_policy_comes_from_environment() {
        let config = AppConfig::from_lookup(|key| (key == FAULT_POLICY_VAR).then(|| "abort".to_string())).unwrap();
        assert_eq!(config.fault_policy, FaultPolicy::Abort);
    }

    #[test]
    fn bad_fault_policy_is_an_error() {
        let err = AppConfig::from_lookup(|_| Some("retry".to_string())).unwrap_err();
        assert_eq!(err, FaultPolicyParseError("retry".to_string()));
    }
}
