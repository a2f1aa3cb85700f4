//! GPU types and helpers shared by the overlay renderers.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};
use crate::render::{RenderCtx, RenderTarget};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub(super) const VIEWPORT_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
        Some(size) => size,
        None => panic!("ViewportUniform is zero-sized"),
    };

pub(super) fn viewport_bgl_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(VIEWPORT_UBO_SIZE),
        },
        count: None,
    }
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── pipeline ──────────────────────────────────────────────────────────────

/// Instanced unit-quad pipeline drawing with premultiplied alpha.
pub(super) fn overlay_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader_src: &str,
    bgl: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Load-and-store pass over the surface view.
pub(super) fn begin_overlay_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &str,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
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
    })
}

/// Grows an instance buffer to hold at least `required` items.
pub(super) fn ensure_instance_buffer<T>(
    ctx: &RenderCtx<'_>,
    label: &str,
    buffer: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
) {
    if required <= *capacity && buffer.is_some() {
        return;
    }
    let new_cap = required.next_power_of_two().max(64);
    *buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_cap * std::mem::size_of::<T>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}

// ── scissor ───────────────────────────────────────────────────────────────

/// Converts a logical clip rect to a physical scissor `(x, y, w, h)`.
///
/// `None` clip covers the whole viewport; a zero-area result returns `None`
/// and the caller skips the draw.
pub(super) fn clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let vw = (viewport.width * scale).max(1.0) as u32;
    let vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, vw, vh),
        Some(r) => {
            let to_px = |v: f32, max: u32| ((v * scale).max(0.0) as u32).min(max);
            let x0 = to_px(r.origin.x, vw);
            let y0 = to_px(r.origin.y, vh);
            let x1 = to_px(r.origin.x + r.size.x, vw);
            let y1 = to_px(r.origin.y + r.size.y, vh);
            (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

/// Splits `clips` into runs of equal clip rects: `(start, end, clip)`.
pub(super) fn clip_runs(clips: &[Option<Rect>]) -> Vec<(u32, u32, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    while start < clips.len() {
        let clip = clips[start];
        let mut end = start + 1;
        while end < clips.len() && clips[end] == clip {
            end += 1;
        }
        runs.push((start as u32, end as u32, clip));
        start = end;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── scissor ───────────────────────────────────────────────────────────

    #[test]
    fn no_clip_covers_viewport() {
        let s = clip_to_scissor(None, Viewport::new(100.0, 50.0), 2.0);
        assert_eq!(s, Some((0, 0, 200, 100)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let clip = Rect::new(10.0, 10.0, 200.0, 20.0);
        let s = clip_to_scissor(Some(clip), Viewport::new(100.0, 100.0), 2.0);
        assert_eq!(s, Some((20, 20, 180, 40)));
    }

    #[test]
    fn empty_clip_skips_draw() {
        let clip = Rect::new(10.0, 10.0, 0.0, 20.0);
        assert_eq!(clip_to_scissor(Some(clip), Viewport::new(100.0, 100.0), 1.0), None);
    }

    // ── runs ──────────────────────────────────────────────────────────────

    #[test]
    fn clip_runs_group_consecutive_items() {
        let a = Some(Rect::new(0.0, 0.0, 1.0, 1.0));
        let runs = clip_runs(&[None, None, a, a, None]);
        assert_eq!(runs, vec![(0, 2, None), (2, 4, a), (4, 5, None)]);
    }

    #[test]
    fn clip_runs_of_nothing() {
        assert!(clip_runs(&[]).is_empty());
    }

    #[test]
    fn viewport_uniform_never_zero() {
        let u = ViewportUniform::new(Viewport::new(0.0, 0.0));
        assert_eq!(u.viewport, [1.0, 1.0]);
        assert_eq!(VIEWPORT_UBO_SIZE.get(), 16);
    }
}
