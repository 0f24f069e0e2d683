//! Synchronous copy of an offscreen colour target back to the CPU.

use crate::view::RenderError;

/// Bytes per RGBA8 texel.
pub const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch of the staging buffer for a texture `width` texels wide.
///
/// `copy_texture_to_buffer` requires each row to start on a
/// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`] boundary.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drop the per-row alignment padding from a mapped staging buffer.
#[must_use]
pub fn strip_row_padding(
    padded: &[u8],
    width: u32,
    height: u32,
    padded_row: u32,
) -> Vec<u8> {
    let row = (width * BYTES_PER_PIXEL) as usize;
    let padded_row = padded_row as usize;
    let mut pixels = Vec::with_capacity(row * height as usize);
    for y in 0..height as usize {
        let start = y * padded_row;
        pixels.extend_from_slice(&padded[start..start + row]);
    }
    pixels
}

/// Staging buffer sized for one frame of a fixed-size colour target.
pub struct Readback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row: u32,
}

impl Readback {
    /// Allocate a `MAP_READ` staging buffer for a `width`×`height` target.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let padded_row = padded_bytes_per_row(width);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Readback Buffer"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            width,
            height,
            padded_row,
        }
    }

    /// Record the texture → staging buffer copy into `encoder`.
    pub fn encode_copy(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Map the staging buffer, wait for the GPU, and return packed RGBA rows.
    ///
    /// Must be called after the encoder holding [`Self::encode_copy`] has
    /// been submitted.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if polling or mapping fails.
    pub fn read(&self, device: &wgpu::Device) -> Result<Vec<u8>, RenderError> {
        let slice = self.buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(RenderError::Poll)?;

        match receiver.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(RenderError::Map(e)),
            Err(_) => return Err(RenderError::ReadbackDropped),
        }

        let pixels = {
            let data = slice.get_mapped_range();
            strip_row_padding(&data, self.width, self.height, self.padded_row)
        };
        self.buffer.unmap();
        Ok(pixels)
    }
}
