//! Offscreen target manager.
//!
//! Owns the multisampled color target and its single-sample resolve target.
//! Any change of size, format or sample count tears both down and creates
//! them again.

use thiserror::Error;
use trianglebin_engine::device::{capture, DeviceError};

use crate::params::{PixelFormat, SampleCount};

/// How the multisampled target reaches the resolve target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResolveMode {
    /// Load-only render pass with a resolve attachment.
    Multisample,
    /// Single-sample source: a texture copy.
    Copy,
}

impl ResolveMode {
    pub fn for_samples(samples: u32) -> Self {
        if samples > 1 { ResolveMode::Multisample } else { ResolveMode::Copy }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TargetError {
    #[error("offscreen target {width}x{height} has zero area")]
    ZeroSize { width: u32, height: u32 },

    #[error("offscreen target {width}x{height} exceeds the device limit of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("{format:?} cannot be used as a sampled render target on this device")]
    NotRenderable { format: wgpu::TextureFormat },

    #[error("{format:?} does not support {samples}x multisampling with resolve on this device")]
    UnsupportedSampleCount { format: wgpu::TextureFormat, samples: u32 },

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Size, format and sample count of one offscreen target set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetDesc {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    pub samples: u32,
}

impl TargetDesc {
    pub fn new(width: u32, height: u32, format: wgpu::TextureFormat, samples: u32) -> Self {
        Self { width, height, format, samples }
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        ResolveMode::for_samples(self.samples)
    }

    /// The render target of the triangle pass.
    pub fn multisampled(&self) -> wgpu::TextureDescriptor<'static> {
        let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
        if self.resolve_mode() == ResolveMode::Copy {
            usage |= wgpu::TextureUsages::COPY_SRC;
        }
        wgpu::TextureDescriptor {
            label: Some("trianglebin msaa color"),
            size: self.extent(),
            mip_level_count: 1,
            sample_count: self.samples,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage,
            view_formats: &[],
        }
    }

    /// Single-sample, shader-readable copy read by the blit pass.
    pub fn resolve(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some("trianglebin resolved color"),
            size: self.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }
    }

    /// Checks the descriptor against device limits and format support.
    pub fn validate(&self, limits: &wgpu::Limits, caps: &FormatCaps) -> Result<(), TargetError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(TargetError::ZeroSize { width, height });
        }
        let max = limits.max_texture_dimension_2d;
        if width > max || height > max {
            return Err(TargetError::TooLarge { width, height, max });
        }
        if !caps.renderable {
            return Err(TargetError::NotRenderable { format: self.format });
        }
        if !caps.samples.iter().any(|s| s.count() == self.samples) {
            return Err(TargetError::UnsupportedSampleCount { format: self.format, samples: self.samples });
        }
        Ok(())
    }
}

// ── format capabilities ───────────────────────────────────────────────────

/// What the device can do with one offscreen format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FormatCaps {
    pub renderable: bool,
    /// Sample counts usable for rendering and resolving, ascending.
    pub samples: Vec<SampleCount>,
}

impl FormatCaps {
    pub fn from_features(features: &wgpu::TextureFormatFeatures) -> Self {
        let renderable = features
            .allowed_usages
            .contains(wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING);
        let resolvable = features
            .flags
            .contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE);

        let samples = SampleCount::ALL
            .into_iter()
            .filter(|s| match s {
                SampleCount::X1 => renderable,
                s => renderable && resolvable && features.flags.sample_count_supported(s.count()),
            })
            .collect();
        Self { renderable, samples }
    }

    /// Highest supported count not above `requested`; 1 when nothing fits.
    pub fn snap(&self, requested: SampleCount) -> SampleCount {
        self.samples
            .iter()
            .copied()
            .filter(|&s| s <= requested)
            .max()
            .unwrap_or(SampleCount::X1)
    }
}

/// Capabilities of both selectable formats, queried once at start-up.
#[derive(Debug, Clone)]
pub struct DeviceCaps {
    pub limits: wgpu::Limits,
    formats: [FormatCaps; 2],
}

impl DeviceCaps {
    pub fn new(limits: wgpu::Limits, query: impl Fn(wgpu::TextureFormat) -> wgpu::TextureFormatFeatures) -> Self {
        let formats = PixelFormat::ALL.map(|f| FormatCaps::from_features(&query(f.texture_format())));
        for (format, caps) in PixelFormat::ALL.iter().zip(&formats) {
            log::info!(
                "{}: renderable {}, sample counts {:?}",
                format.label(),
                caps.renderable,
                caps.samples.iter().map(|s| s.count()).collect::<Vec<_>>()
            );
        }
        Self { limits, formats }
    }

    pub fn format(&self, format: PixelFormat) -> &FormatCaps {
        &self.formats[format.index()]
    }
}

// ── GPU targets ───────────────────────────────────────────────────────────

/// One live target set and its views.
pub struct OffscreenTargets {
    desc: TargetDesc,
    ms_texture: wgpu::Texture,
    ms_view: wgpu::TextureView,
    resolve_texture: wgpu::Texture,
    resolve_view: wgpu::TextureView,
}

impl OffscreenTargets {
    /// Creates both textures and their views, failing with whatever the
    /// device reports (out of memory, invalid view).
    pub fn create(device: &wgpu::Device, desc: TargetDesc) -> Result<Self, DeviceError> {
        capture(device, "offscreen target creation", || {
            let ms_texture = device.create_texture(&desc.multisampled());
            let ms_view = ms_texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("trianglebin msaa color view"),
                ..Default::default()
            });
            let resolve_texture = device.create_texture(&desc.resolve());
            let resolve_view = resolve_texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("trianglebin resolved color view"),
                ..Default::default()
            });
            Self { desc, ms_texture, ms_view, resolve_texture, resolve_view }
        })
    }

    pub fn desc(&self) -> TargetDesc {
        self.desc
    }

    pub fn ms_view(&self) -> &wgpu::TextureView {
        &self.ms_view
    }

    pub fn resolve_view(&self) -> &wgpu::TextureView {
        &self.resolve_view
    }

    /// Records the resolve of the multisampled target into the resolve target.
    pub fn encode_resolve(&self, encoder: &mut wgpu::CommandEncoder) {
        match self.desc.resolve_mode() {
            ResolveMode::Multisample => {
                let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("trianglebin resolve"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &self.ms_view,
                        resolve_target: Some(&self.resolve_view),
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }
            ResolveMode::Copy => {
                encoder.copy_texture_to_texture(
                    self.ms_texture.as_image_copy(),
                    self.resolve_texture.as_image_copy(),
                    self.desc.extent(),
                );
            }
        }
    }
}

/// Holds the current target set and counts its lifecycle.
///
/// Generic over the target type so the teardown order can be checked
/// without a device.
pub struct TargetManager<T = OffscreenTargets> {
    current: Option<T>,
    desc: Option<TargetDesc>,
    generation: u64,
    released: u64,
}

impl<T> Default for TargetManager<T> {
    fn default() -> Self {
        Self { current: None, desc: None, generation: 0, released: 0 }
    }
}

impl<T> TargetManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the current set, then creates a new one from `desc`.
    ///
    /// When `create` fails the manager is left empty.
    pub fn replace_with<E>(
        &mut self,
        desc: TargetDesc,
        create: impl FnOnce(TargetDesc) -> Result<T, E>,
    ) -> Result<&T, E> {
        if let Some(old) = self.current.take() {
            drop(old);
            self.released += 1;
        }
        self.desc = None;

        let created = create(desc)?;
        self.generation += 1;
        self.desc = Some(desc);
        Ok(&*self.current.insert(created))
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn desc(&self) -> Option<TargetDesc> {
        self.desc
    }

    /// Number of sets created so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of sets released so far.
    pub fn released(&self) -> u64 {
        self.released
    }
}

impl TargetManager<OffscreenTargets> {
    /// Validates `desc`, then replaces the live targets.
    ///
    /// A validation error leaves the previous targets in place. A device
    /// error comes after teardown and leaves no targets.
    pub fn rebuild(&mut self, device: &wgpu::Device, caps: &DeviceCaps, format: PixelFormat, desc: TargetDesc) -> Result<(), TargetError> {
        desc.validate(&caps.limits, caps.format(format))?;
        self.replace_with(desc, |d| OffscreenTargets::create(device, d))?;
        log::info!(
            "offscreen targets rebuilt: {}x{} {:?} x{} (generation {})",
            desc.width,
            desc.height,
            desc.format,
            desc.samples,
            self.generation
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn caps(samples: &[SampleCount]) -> FormatCaps {
        FormatCaps { renderable: true, samples: samples.to_vec() }
    }

    // ── descriptors ────────────────────────────────────────────────────────

    #[test]
    fn ms_and_resolve_match_in_size_and_format() {
        let desc = TargetDesc::new(1280, 720, wgpu::TextureFormat::Rgba32Float, 4);
        let ms = desc.multisampled();
        let rs = desc.resolve();
        assert_eq!(ms.size, rs.size);
        assert_eq!(ms.format, rs.format);
        assert_eq!(ms.sample_count, 4);
        assert_eq!(rs.sample_count, 1);
    }

    #[test]
    fn resolve_target_is_shader_readable() {
        let rs = TargetDesc::new(64, 64, wgpu::TextureFormat::Rgba8Unorm, 8).resolve();
        assert!(rs.usage.contains(wgpu::TextureUsages::TEXTURE_BINDING));
        assert!(rs.usage.contains(wgpu::TextureUsages::RENDER_ATTACHMENT));
    }

    #[test]
    fn single_sample_source_is_copied() {
        let desc = TargetDesc::new(64, 64, wgpu::TextureFormat::Rgba8Unorm, 1);
        assert_eq!(desc.resolve_mode(), ResolveMode::Copy);
        assert!(desc.multisampled().usage.contains(wgpu::TextureUsages::COPY_SRC));

        let desc = TargetDesc { samples: 2, ..desc };
        assert_eq!(desc.resolve_mode(), ResolveMode::Multisample);
        assert!(!desc.multisampled().usage.contains(wgpu::TextureUsages::COPY_SRC));
    }

    // ── validation ─────────────────────────────────────────────────────────

    #[test]
    fn validate_rejects_zero_and_oversized() {
        let limits = wgpu::Limits::default();
        let c = caps(&[SampleCount::X1]);
        let fmt = wgpu::TextureFormat::Rgba8Unorm;

        assert_eq!(
            TargetDesc::new(0, 10, fmt, 1).validate(&limits, &c),
            Err(TargetError::ZeroSize { width: 0, height: 10 })
        );
        let max = limits.max_texture_dimension_2d;
        assert_eq!(
            TargetDesc::new(max + 1, 10, fmt, 1).validate(&limits, &c),
            Err(TargetError::TooLarge { width: max + 1, height: 10, max })
        );
        assert!(TargetDesc::new(max, 10, fmt, 1).validate(&limits, &c).is_ok());
    }

    #[test]
    fn validate_rejects_unsupported_sample_count() {
        let limits = wgpu::Limits::default();
        let c = caps(&[SampleCount::X1, SampleCount::X4]);
        let fmt = wgpu::TextureFormat::Rgba32Float;
        assert!(TargetDesc::new(8, 8, fmt, 4).validate(&limits, &c).is_ok());
        assert_eq!(
            TargetDesc::new(8, 8, fmt, 8).validate(&limits, &c),
            Err(TargetError::UnsupportedSampleCount { format: fmt, samples: 8 })
        );
    }

    #[test]
    fn snap_picks_highest_supported_below_request() {
        let c = caps(&[SampleCount::X1, SampleCount::X4]);
        assert_eq!(c.snap(SampleCount::X8), SampleCount::X4);
        assert_eq!(c.snap(SampleCount::X4), SampleCount::X4);
        assert_eq!(c.snap(SampleCount::X2), SampleCount::X1);
        assert_eq!(caps(&[]).snap(SampleCount::X8), SampleCount::X1);
    }

    #[test]
    fn caps_need_resolve_support_for_msaa() {
        let mut features = wgpu::TextureFormatFeatures {
            allowed_usages: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            flags: wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4,
        };
        assert_eq!(FormatCaps::from_features(&features).samples, [SampleCount::X1]);

        features.flags |= wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE;
        assert_eq!(
            FormatCaps::from_features(&features).samples,
            [SampleCount::X1, SampleCount::X4]
        );
    }

    #[test]
    fn caps_without_render_usage_support_nothing() {
        let features = wgpu::TextureFormatFeatures {
            allowed_usages: wgpu::TextureUsages::TEXTURE_BINDING,
            flags: wgpu::TextureFormatFeatureFlags::all(),
        };
        let c = FormatCaps::from_features(&features);
        assert!(!c.renderable);
        assert!(c.samples.is_empty());
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    /// Records its own drop in a shared log.
    struct Tracked {
        id: u64,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.id));
        }
    }

    #[test]
    fn replace_releases_previous_exactly_once_before_creating() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager: TargetManager<Tracked> = TargetManager::new();
        let fmt = wgpu::TextureFormat::Rgba8Unorm;

        for (id, (w, h)) in [(1u64, (1280, 720)), (2, (640, 480)), (3, (640, 480))] {
            let log_ref = Rc::clone(&log);
            let created = manager.replace_with(TargetDesc::new(w, h, fmt, 1), |_| {
                log_ref.borrow_mut().push(format!("create {id}"));
                Ok::<_, DeviceError>(Tracked { id, log: Rc::clone(&log_ref) })
            });
            assert!(created.is_ok());
        }

        assert_eq!(
            *log.borrow(),
            ["create 1", "drop 1", "create 2", "drop 2", "create 3"]
        );
        assert_eq!(manager.generation(), 3);
        assert_eq!(manager.released(), 2);
        assert_eq!(manager.desc().map(|d| (d.width, d.height)), Some((640, 480)));
        assert_eq!(manager.current().map(|t| t.id), Some(3));
    }

    #[test]
    fn failed_create_leaves_the_manager_empty() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager: TargetManager<Tracked> = TargetManager::new();
        let fmt = wgpu::TextureFormat::Rgba8Unorm;

        let log_ref = Rc::clone(&log);
        let first = manager.replace_with(TargetDesc::new(800, 600, fmt, 4), |_| {
            Ok::<_, DeviceError>(Tracked { id: 1, log: log_ref })
        });
        assert!(first.is_ok());

        let err = manager
            .replace_with(TargetDesc::new(16384, 16384, fmt, 4), |_| {
                Err(DeviceError::OutOfMemory { what: "offscreen target creation" })
            })
            .err();
        assert_eq!(err, Some(DeviceError::OutOfMemory { what: "offscreen target creation" }));

        // The old set went first; nothing replaced it.
        assert_eq!(*log.borrow(), ["drop 1"]);
        assert!(manager.current().is_none());
        assert_eq!(manager.desc(), None);
        assert_eq!(manager.generation(), 1);
        assert_eq!(manager.released(), 1);
    }

    #[test]
    fn device_errors_surface_as_target_errors() {
        let err = TargetError::from(DeviceError::OutOfMemory { what: "offscreen target creation" });
        assert_eq!(err.to_string(), "GPU out of memory during offscreen target creation");
    }
}
