/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: the offscreen image is blitted verbatim, so a UNORM
    /// surface shows the stored values without an extra transfer curve.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// `AutoNoVsync` presents immediately and falls back to FIFO where
    /// tearing modes are unavailable.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device cannot be created without.
    pub required_features: wgpu::Features,

    /// Features requested only when the adapter offers them.
    ///
    /// `TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES` unlocks multisampling for
    /// formats whose guaranteed feature set is single-sample only.
    pub optional_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Number of frames the surface may queue ahead of the GPU.
    ///
    /// Acquisition blocks once this many frames are in flight.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            optional_features: wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 3,
        }
    }
}

impl GpuInit {
    /// Resolves the feature set to request from an adapter offering `available`.
    pub fn features_for(&self, available: wgpu::Features) -> wgpu::Features {
        self.required_features | (self.optional_features & available)
    }
}
