//! Per-series GPU buffers. Allocated once at their initial length; later
//! uploads replace the contents in place and must match that length.

use micscope_core::{check_upload, ScopeError, SeriesKind, UsageHint};
use wgpu::util::DeviceExt;

fn buffer_usages(hint: UsageHint) -> wgpu::BufferUsages {
    if hint.is_writable() {
        wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST
    } else {
        wgpu::BufferUsages::VERTEX
    }
}

pub struct SeriesBuffer {
    kind: SeriesKind,
    buffer: wgpu::Buffer,
    len: usize,
    hint: UsageHint,
}

impl SeriesBuffer {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

pub fn create_series_buffer(
    device: &wgpu::Device,
    kind: SeriesKind,
    initial_data: &[f32],
    hint: UsageHint,
) -> SeriesBuffer {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(kind.label()),
        contents: bytemuck::cast_slice(initial_data),
        usage: buffer_usages(hint),
    });
    SeriesBuffer {
        kind,
        buffer,
        len: initial_data.len(),
        hint,
    }
}

pub fn update_series_buffer(
    queue: &wgpu::Queue,
    handle: &SeriesBuffer,
    new_data: &[f32],
) -> Result<(), ScopeError> {
    check_upload(handle.kind, handle.hint, handle.len, new_data.len())?;
    queue.write_buffer(&handle.buffer, 0, bytemuck::cast_slice(new_data));
    Ok(())
}
