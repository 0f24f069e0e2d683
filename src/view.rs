//! Render targets.
//!
//! A [`FrameView`] draws one [`StructureModel`] either into an offscreen
//! texture, whose pixels are read back after every render, or into a
//! window surface that is presented directly. Its size is fixed at
//! construction; there is no resize operation.

use std::fmt;

use crate::camera::{CameraUniform, OrbitCamera};
use crate::error::LiveError;
use crate::frame::Frame;
use crate::gpu::context::{Context, ContextError};
use crate::gpu::readback::Readback;
use crate::gpu::texture::{RenderTarget, OFFSCREEN_FORMAT};
use crate::renderer::sphere::SpherePass;
use crate::structure::StructureModel;

/// Errors raised by a single render call.
#[derive(Debug)]
pub enum RenderError {
    /// The window surface could not provide a texture.
    Surface(wgpu::SurfaceError),
    /// Mapping the readback buffer failed.
    Map(wgpu::BufferAsyncError),
    /// Waiting on the device for the readback failed.
    Poll(wgpu::PollError),
    /// The map callback was dropped without reporting a result.
    ReadbackDropped,
    /// A pixel buffer did not hold exactly `width × height × 4` bytes.
    FrameSize {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
    /// Image encoding failed.
    Encode(image::ImageError),
    /// Pixels were requested from a view that presents to a window.
    NotOffscreen,
    /// The view was asked to render a model other than the one it was
    /// built for.
    ModelMismatch {
        /// Id of the model the view was built for.
        expected: u64,
        /// Id of the model passed to `render`.
        actual: u64,
    },
}

impl RenderError {
    /// Whether the next render call can be expected to succeed.
    ///
    /// A lost or outdated surface has already been reconfigured by the time
    /// this error is returned.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Surface(
                wgpu::SurfaceError::Lost
                    | wgpu::SurfaceError::Outdated
                    | wgpu::SurfaceError::Timeout
            )
        )
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "surface texture unavailable: {e}"),
            Self::Map(e) => write!(f, "readback map failed: {e}"),
            Self::Poll(e) => write!(f, "device poll failed: {e}"),
            Self::ReadbackDropped => {
                write!(f, "readback callback dropped before completion")
            }
            Self::FrameSize { expected, actual } => write!(
                f,
                "pixel buffer has {actual} bytes, expected {expected}"
            ),
            Self::Encode(e) => write!(f, "frame encoding failed: {e}"),
            Self::NotOffscreen => {
                write!(f, "view presents to a window and has no pixels")
            }
            Self::ModelMismatch { expected, actual } => write!(
                f,
                "view built for model {expected} cannot render model {actual}"
            ),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Map(e) => Some(e),
            Self::Poll(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

/// Appearance and animation settings of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewStyle {
    /// Clear colour (linear RGB).
    pub background: [f32; 3],
    /// Camera orbit step applied after every render, in degrees.
    pub orbit_degrees_per_frame: f32,
    /// Multiplier applied to van der Waals radii.
    pub atom_scale: f32,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            background: [0.05, 0.05, 0.08],
            orbit_degrees_per_frame: 1.0,
            atom_scale: 0.35,
        }
    }
}

/// Outcome of [`FrameView::render`].
#[derive(Debug)]
pub enum Rendered {
    /// Pixels read back from an offscreen view.
    Pixels(Frame),
    /// The frame was presented to the bound window surface.
    Presented,
}

enum Target {
    Offscreen {
        color: RenderTarget,
        readback: Readback,
    },
    Surface {
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
    },
}

/// A fixed-size render target for one structure model.
pub struct FrameView {
    width: u32,
    height: u32,
    model_id: u64,
    target: Target,
    depth: RenderTarget,
    spheres: SpherePass,
    orbit: OrbitCamera,
    uniform: CameraUniform,
    style: ViewStyle,
    frames_rendered: u64,
}

fn check_size(width: u32, height: u32) -> Result<(), LiveError> {
    if width == 0 || height == 0 {
        return Err(LiveError::InvalidSize { width, height });
    }
    Ok(())
}

impl FrameView {
    /// Create an offscreen view whose renders return pixel buffers.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidSize`] if either dimension is zero.
    pub fn offscreen(
        context: &Context,
        model: &StructureModel,
        width: u32,
        height: u32,
    ) -> Result<Self, LiveError> {
        check_size(width, height)?;
        let target = Target::Offscreen {
            color: RenderTarget::color(&context.device, width, height),
            readback: Readback::new(&context.device, width, height),
        };
        Ok(Self::with_target(context, model, width, height, target, OFFSCREEN_FORMAT))
    }

    /// Create a view bound to a window surface.
    ///
    /// The surface is configured once at `width`×`height` and never
    /// resized.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidSize`] for a zero dimension and
    /// [`ContextError::UnsupportedSurface`] if the adapter cannot present
    /// to the surface.
    pub fn for_surface(
        context: &Context,
        surface: wgpu::Surface<'static>,
        model: &StructureModel,
        width: u32,
        height: u32,
    ) -> Result<Self, LiveError> {
        check_size(width, height)?;
        let caps = surface.get_capabilities(&context.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .ok_or(ContextError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&context.device, &config);
        log::debug!("configured {width}x{height} surface as {format:?}");

        let target = Target::Surface { surface, config };
        Ok(Self::with_target(context, model, width, height, target, format))
    }

    fn with_target(
        context: &Context,
        model: &StructureModel,
        width: u32,
        height: u32,
        target: Target,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let style = ViewStyle::default();
        let structure = model.structure();
        Self {
            width,
            height,
            model_id: model.id(),
            target,
            depth: RenderTarget::depth(&context.device, width, height),
            spheres: SpherePass::new(&context.device, color_format, model),
            orbit: OrbitCamera::new(
                structure.center,
                structure.radius,
                width as f32 / height as f32,
                style.orbit_degrees_per_frame,
            ),
            uniform: CameraUniform::new(),
            style,
            frames_rendered: 0,
        }
    }

    /// Replace the view's appearance settings.
    pub fn set_style(&mut self, style: ViewStyle) {
        self.orbit.set_degrees_per_frame(style.orbit_degrees_per_frame);
        self.style = style;
    }

    /// Fixed `(width, height)` in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether this view renders into a window surface.
    #[must_use]
    pub fn is_surface(&self) -> bool {
        matches!(self.target, Target::Surface { .. })
    }

    /// Number of successful render calls so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The orbit camera, for applying user input between renders.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.orbit
    }

    /// Draw one frame, then advance the camera orbit.
    ///
    /// Offscreen views block until the pixels are on the CPU and return
    /// [`Rendered::Pixels`] holding exactly `width × height × 4` bytes.
    /// Surface views present and return [`Rendered::Presented`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if `model` is not the model this view was
    /// built for, if the surface cannot supply a texture, or if readback
    /// fails.
    pub fn render(
        &mut self,
        context: &Context,
        model: &StructureModel,
    ) -> Result<Rendered, RenderError> {
        if model.id() != self.model_id {
            return Err(RenderError::ModelMismatch {
                expected: self.model_id,
                actual: model.id(),
            });
        }

        self.uniform.update_view_proj(self.orbit.camera());
        self.uniform.atom_scale = self.style.atom_scale;
        self.spheres.update_camera(&context.queue, &self.uniform);

        let rendered = match &self.target {
            Target::Offscreen { color, readback } => {
                let mut encoder = context.create_encoder("Offscreen Frame Encoder");
                self.encode_pass(&mut encoder, &color.view);
                readback.encode_copy(&mut encoder, &color.texture);
                context.submit(encoder);
                let pixels = readback.read(&context.device)?;
                Rendered::Pixels(Frame::new(self.width, self.height, pixels)?)
            }
            Target::Surface { surface, config } => {
                let output = match surface.get_current_texture() {
                    Ok(output) => output,
                    Err(
                        e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated),
                    ) => {
                        surface.configure(&context.device, config);
                        return Err(RenderError::Surface(e));
                    }
                    Err(e) => return Err(RenderError::Surface(e)),
                };
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder = context.create_encoder("Surface Frame Encoder");
                self.encode_pass(&mut encoder, &view);
                context.submit(encoder);
                output.present();
                Rendered::Presented
            }
        };

        self.orbit.advance();
        self.frames_rendered += 1;
        Ok(rendered)
    }

    /// Render and return the pixels of an offscreen view.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotOffscreen`] for surface views, otherwise
    /// as [`FrameView::render`].
    pub fn render_pixels(
        &mut self,
        context: &Context,
        model: &StructureModel,
    ) -> Result<Frame, RenderError> {
        if self.is_surface() {
            return Err(RenderError::NotOffscreen);
        }
        match self.render(context, model)? {
            Rendered::Pixels(frame) => Ok(frame),
            Rendered::Presented => Err(RenderError::NotOffscreen),
        }
    }

    fn encode_pass(&self, encoder: &mut wgpu::CommandEncoder, color: &wgpu::TextureView) {
        let [r, g, b] = self.style.background;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sphere Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(r),
                        g: f64::from(g),
                        b: f64::from(b),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });
        self.spheres.draw(&mut pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &[u8] = b"\
ATOM      1  N   GLY A   1      -1.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       1.000   0.500   0.000  1.00  0.00           C
ATOM      3  O   GLY A   1       0.000  -1.000   1.000  1.00  0.00           O
";

    fn gpu_context() -> Option<Context> {
        match Context::headless() {
            Ok(context) => Some(context),
            Err(e) => {
                log::warn!("skipping GPU test: {e}");
                None
            }
        }
    }

    #[test]
    fn offscreen_render_yields_exact_buffer() {
        let Some(context) = gpu_context() else {
            return;
        };
        let model = StructureModel::new(&context, PDB).unwrap();
        let (width, height) = (97, 61);
        let mut view = FrameView::offscreen(&context, &model, width, height).unwrap();

        for _ in 0..2 {
            let frame = view.render_pixels(&context, &model).unwrap();
            assert_eq!(frame.pixels().len(), (width * height * 4) as usize);
            assert_eq!((frame.width(), frame.height()), (width, height));
        }
        assert_eq!(view.frames_rendered(), 2);
    }

    #[test]
    fn zero_size_is_rejected() {
        let Some(context) = gpu_context() else {
            return;
        };
        let model = StructureModel::new(&context, PDB).unwrap();
        assert!(matches!(
            FrameView::offscreen(&context, &model, 0, 10),
            Err(LiveError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn foreign_model_is_refused() {
        let Some(context) = gpu_context() else {
            return;
        };
        let model = StructureModel::new(&context, PDB).unwrap();
        let other = StructureModel::new(&context, PDB).unwrap();
        let mut view = FrameView::offscreen(&context, &model, 8, 8).unwrap();
        assert!(matches!(
            view.render(&context, &other),
            Err(RenderError::ModelMismatch { .. })
        ));
    }

    #[test]
    fn paused_camera_repeats_the_same_frame() {
        let Some(context) = gpu_context() else {
            return;
        };
        let model = StructureModel::new(&context, PDB).unwrap();
        let mut view = FrameView::offscreen(&context, &model, 32, 32).unwrap();
        view.camera_mut().set_paused(true);
        let first = view.render_pixels(&context, &model).unwrap();
        let second = view.render_pixels(&context, &model).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lost_surface_is_recoverable() {
        assert!(RenderError::Surface(wgpu::SurfaceError::Lost).is_recoverable());
        assert!(!RenderError::ReadbackDropped.is_recoverable());
    }
}
