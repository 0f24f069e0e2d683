use crate::error::LiveError;
use crate::frame::Frame;
use crate::gpu::context::Context;
use crate::options::ViewOptions;
use crate::structure::StructureModel;
use crate::view::{FrameView, RenderError};

/// Anything that can produce RGBA frames for a stream.
///
/// Renders are assumed not to be reentrant; the server never calls
/// `render_frame` on the same source from two threads at once.
pub trait FrameSource {
    /// Fixed `(width, height)` of every frame.
    fn size(&self) -> (u32, u32);

    /// Produce the next frame. Frames come back in call order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the frame cannot be produced; the calling
    /// connection ends.
    fn render_frame(&mut self) -> Result<Frame, RenderError>;
}

/// GPU context, structure and offscreen view owned together.
///
/// Fields drop in declaration order, so the view is released before the
/// model and the model before the context.
pub struct OffscreenScene {
    view: FrameView,
    model: StructureModel,
    context: Context,
}

impl OffscreenScene {
    /// Build an offscreen view of `model` sized by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidSize`] for a zero dimension.
    pub fn new(
        context: Context,
        model: StructureModel,
        options: &ViewOptions,
    ) -> Result<Self, LiveError> {
        let mut view =
            FrameView::offscreen(&context, &model, options.width, options.height)?;
        view.set_style(options.style());
        Ok(Self {
            view,
            model,
            context,
        })
    }

    /// Create a headless context, parse `structure`, and build the view.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError`] if no GPU is available, the structure does not
    /// parse, or the size is invalid.
    pub fn load(structure: &[u8], options: &ViewOptions) -> Result<Self, LiveError> {
        let context = Context::headless()?;
        let model = StructureModel::new(&context, structure)?;
        Self::new(context, model, options)
    }
}

impl FrameSource for OffscreenScene {
    fn size(&self) -> (u32, u32) {
        self.view.size()
    }

    fn render_frame(&mut self) -> Result<Frame, RenderError> {
        self.view.render_pixels(&self.context, &self.model)
    }
}
