use bytemuck::{Pod, Zeroable};

const INITIAL_CAPACITY: usize = 1 << 16;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Point2D {
    pub position: [f32; 2],
}

/// Vertex buffer holding the points of the current frame.
///
/// Grows to the next power of two when a larger cloud is uploaded; never
/// shrinks.
pub struct PointCloudBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    points_count: usize,
}

fn create_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Caustic Point Buffer"),
        size: (capacity * std::mem::size_of::<Point2D>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl PointCloudBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: create_buffer(device, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            points_count: 0,
        }
    }

    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[Point2D]) {
        if points.len() > self.capacity {
            self.capacity = points.len().next_power_of_two();
            self.buffer = create_buffer(device, self.capacity);
        }
        if !points.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(points));
        }
        self.points_count = points.len();
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn points_count(&self) -> u32 {
        self.points_count as u32
    }
}

pub fn point_2d_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Point2D>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        }],
    }
}
