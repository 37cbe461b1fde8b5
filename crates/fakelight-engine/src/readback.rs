use anyhow::{Context, Result};

/// Tightly packed RGBA8 pixels copied back from the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl FramePixels {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Bytes per row of a copy, padded to wgpu's row alignment.
fn padded_row_bytes(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

/// Copies an RGBA8 texture to the CPU, blocking until the GPU is done.
pub(crate) fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<FramePixels> {
    let (width, height) = (texture.width(), texture.height());
    let unpadded = (width * 4) as usize;
    let padded = padded_row_bytes(width);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("fakelight readback buffer"),
        size: u64::from(padded) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("fakelight readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("failed to wait for the readback copy")?;
    rx.recv()
        .context("readback callback was dropped")?
        .context("failed to map the readback buffer")?;

    let mut rgba = Vec::with_capacity(unpadded * height as usize);
    {
        let data = slice.get_mapped_range();
        for row in data.chunks(padded as usize) {
            rgba.extend_from_slice(&row[..unpadded]);
        }
    }
    buffer.unmap();

    Ok(FramePixels { width, height, rgba })
}
