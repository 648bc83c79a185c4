// src/wgpu_utils/uniform_buffer.rs
use std::{marker::PhantomData, num::NonZeroU64};

fn type_label<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Typed uniform buffer holding a single `Content` block
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Create buffer with initial data
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", type_label::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });

        buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(bytemuck::bytes_of(initial_content));
        buffer.unmap();

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: bytemuck::bytes_of(initial_content).to_vec(),
        }
    }

    /// Update buffer content, skipping the write when nothing changed
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Rounds `size` up to a multiple of `alignment`.
pub fn align_to(size: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// Array of `Content` blocks bound one at a time through a dynamic offset.
///
/// Each element sits at a multiple of the device's
/// `min_uniform_buffer_offset_alignment`. The buffer grows (and owns a fresh
/// bind group) when a frame needs more blocks than it holds.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(std::mem::size_of::<Content>() as u64, alignment);
        let capacity = capacity.max(1);
        let (buffer, bind_group) = Self::allocate(device, layout, stride, capacity);

        Self {
            buffer,
            bind_group,
            stride,
            capacity,
            content_type: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let label = format!("DynamicUniformBuffer: {}", type_label::<Content>());
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<Content>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    /// Uploads `contents`, element `i` at offset `i * stride`.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        contents: &[Content],
    ) {
        if contents.is_empty() {
            return;
        }

        if contents.len() > self.capacity {
            let capacity = contents.len().next_power_of_two();
            log::debug!(
                "growing {} from {} to {} blocks",
                type_label::<Content>(),
                self.capacity,
                capacity
            );
            let (buffer, bind_group) = Self::allocate(device, layout, self.stride, capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }

        let size = std::mem::size_of::<Content>();
        let mut bytes = vec![0u8; self.stride as usize * contents.len()];
        for (i, content) in contents.iter().enumerate() {
            let start = i * self.stride as usize;
            bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(content));
        }
        queue.write_buffer(&self.buffer, 0, &bytes);
    }

    /// Dynamic offset of element `index`.
    pub fn offset(&self, index: usize) -> u32 {
        (index as u64 * self.stride) as u32
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(336, 256), 512);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(1, 256), 256);
        assert_eq!(align_to(64, 0), 64);
    }

    #[test]
    fn test_type_label_strips_path() {
        assert_eq!(type_label::<crate::gfx::rendering::uniforms::DrawUniforms>(), "DrawUniforms");
        assert_eq!(type_label::<u32>(), "u32");
    }
}
