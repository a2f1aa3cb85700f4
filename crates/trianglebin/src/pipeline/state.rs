use std::num::NonZeroU64;

/// Size of the budget uniform block.
pub const BUDGET_UBO_SIZE: NonZeroU64 = match NonZeroU64::new(16) {
    Some(size) => size,
    None => panic!("budget uniform is zero-sized"),
};

/// Size of the fragment counter: one `u32`.
pub const COUNTER_SIZE: NonZeroU64 = match NonZeroU64::new(4) {
    Some(size) => size,
    None => panic!("counter is zero-sized"),
};

/// Fixed-function state of one pass.
///
/// The default is clockwise front faces, back faces culled, no depth test
/// and no blending.
#[derive(Debug, Clone, PartialEq)]
pub struct PassState {
    pub primitive: wgpu::PrimitiveState,
    pub depth_stencil: Option<wgpu::DepthStencilState>,
    pub blend: Option<wgpu::BlendState>,
    pub write_mask: wgpu::ColorWrites,
}

impl Default for PassState {
    fn default() -> Self {
        Self {
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        }
    }
}

impl PassState {
    pub fn color_target(&self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: self.blend,
            write_mask: self.write_mask,
        }
    }
}

/// State for the triangle pass.
pub fn create_triangle_pass_state() -> PassState {
    PassState::default()
}

/// State for the blit pass. The oversized blit triangle is clockwise too,
/// so the same culling applies.
pub fn create_blit_pass_state() -> PassState {
    PassState::default()
}

/// Budget uniform at binding 0, fragment counter at binding 1.
pub fn triangles_bgl_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(BUDGET_UBO_SIZE),
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: false },
                has_dynamic_offset: false,
                min_binding_size: Some(COUNTER_SIZE),
            },
            count: None,
        },
    ]
}

/// Resolved texture at binding 0, point sampler at binding 1.
///
/// The texture is declared unfilterable so float32 targets bind without
/// extra device features.
pub fn blit_bgl_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
            count: None,
        },
    ]
}

/// Per-pass state and layouts, created once at start-up and shared by
/// every pipeline rebuild.
pub struct PassLayouts {
    pub triangles_state: PassState,
    pub blit_state: PassState,
    pub triangles_bgl: wgpu::BindGroupLayout,
    pub triangles: wgpu::PipelineLayout,
    pub blit_bgl: wgpu::BindGroupLayout,
    pub blit: wgpu::PipelineLayout,
}

impl PassLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let triangles_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trianglebin triangles bgl"),
            entries: &triangles_bgl_entries(),
        });
        let triangles = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trianglebin triangles layout"),
            bind_group_layouts: &[&triangles_bgl],
            immediate_size: 0,
        });

        let blit_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trianglebin blit bgl"),
            entries: &blit_bgl_entries(),
        });
        let blit = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trianglebin blit layout"),
            bind_group_layouts: &[&blit_bgl],
            immediate_size: 0,
        });

        Self {
            triangles_state: create_triangle_pass_state(),
            blit_state: create_blit_pass_state(),
            triangles_bgl,
            triangles,
            blit_bgl,
            blit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_state_culls_back_faces_of_clockwise_triangles() {
        let s = PassState::default();
        assert_eq!(s.primitive.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(s.primitive.front_face, wgpu::FrontFace::Cw);
        assert_eq!(s.primitive.cull_mode, Some(wgpu::Face::Back));
        assert_eq!(s.primitive.polygon_mode, wgpu::PolygonMode::Fill);
    }

    #[test]
    fn pass_state_has_no_depth_or_blend() {
        let s = PassState::default();
        assert!(s.depth_stencil.is_none());
        let target = s.color_target(wgpu::TextureFormat::Rgba32Float);
        assert_eq!(target.blend, None);
        assert_eq!(target.write_mask, wgpu::ColorWrites::ALL);
        assert_eq!(target.format, wgpu::TextureFormat::Rgba32Float);
    }

    #[test]
    fn both_passes_get_their_own_state_without_depth() {
        let triangles = create_triangle_pass_state();
        let blit = create_blit_pass_state();
        for state in [&triangles, &blit] {
            assert!(state.depth_stencil.is_none());
            assert_eq!(state.primitive.front_face, wgpu::FrontFace::Cw);
            assert_eq!(state.primitive.cull_mode, Some(wgpu::Face::Back));
            assert_eq!(state.primitive.polygon_mode, wgpu::PolygonMode::Fill);
            assert_eq!(state.write_mask, wgpu::ColorWrites::ALL);
        }
    }

    #[test]
    fn counter_is_fragment_read_write_storage() {
        let [budget, counter] = triangles_bgl_entries();
        assert_eq!(budget.binding, 0);
        assert!(budget.visibility.contains(wgpu::ShaderStages::VERTEX));
        assert_eq!(counter.binding, 1);
        assert_eq!(counter.visibility, wgpu::ShaderStages::FRAGMENT);
        assert!(matches!(
            counter.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: false },
                ..
            }
        ));
    }

    #[test]
    fn blit_binds_unfilterable_texture_with_point_sampler() {
        let [texture, sampler] = blit_bgl_entries();
        assert!(matches!(
            texture.ty,
            wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                multisampled: false,
                ..
            }
        ));
        assert_eq!(sampler.ty, wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering));
    }
}
