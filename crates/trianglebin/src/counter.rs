//! GPU fragment counter and pixel budget uniform.

use bytemuck::{Pod, Zeroable};

use crate::pipeline::{BUDGET_UBO_SIZE, COUNTER_SIZE};

/// Uniform block read by both triangle shader stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct BudgetUniform {
    pub max_pixels: u32,
    pub _pad: [u32; 3],
}

impl BudgetUniform {
    pub fn new(max_pixels: u32) -> Self {
        Self { max_pixels, _pad: [0; 3] }
    }
}

/// The atomic counter buffer, the budget uniform and their bind group.
pub struct PixelCounter {
    counter: wgpu::Buffer,
    budget: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl PixelCounter {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let counter = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trianglebin pixel counter"),
            size: COUNTER_SIZE.get(),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let budget = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trianglebin pixel budget ubo"),
            size: BUDGET_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trianglebin triangles bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: budget.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: counter.as_entire_binding() },
            ],
        });
        Self { counter, budget, bind_group }
    }

    pub fn write_budget(&self, queue: &wgpu::Queue, max_pixels: u32) {
        queue.write_buffer(&self.budget, 0, bytemuck::bytes_of(&BudgetUniform::new(max_pixels)));
    }

    /// Zeroes the counter ahead of the triangle pass.
    pub fn reset(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.clear_buffer(&self.counter, 0, None);
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_uniform_fills_its_binding() {
        assert_eq!(std::mem::size_of::<BudgetUniform>() as u64, BUDGET_UBO_SIZE.get());
    }

    #[test]
    fn budget_uniform_leads_with_the_limit() {
        let uniform = BudgetUniform::new(1_000);
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(&bytes[..4], &1_000u32.to_ne_bytes());
        assert!(bytes[4..].iter().all(|&b| b == 0));
    }
}
