use crate::{
    animation::{descriptor::AnimationDescriptor, phase::Phase, timer::Animation},
    assets::source::ImageSource,
    foundation::error::{TexAnimError, TexAnimResult},
    raster::{
        blend::{blend_copy_rect, copy_rect},
        buffer::PixelBuffer,
    },
    texture::cycle::{all_on_frame_zero, combined_cycle_len},
};

/// Animation that could not be built and was left out of a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAnimation {
    /// Position of the descriptor in the list given to [`AnimatedTexture::build`].
    pub index: usize,
    /// Spritesheet id named by the descriptor.
    pub source: String,
    /// Rendered build error.
    pub reason: String,
}

/// One target image plus every animation drawn onto it.
///
/// The base image is never modified. Every redraw starts from a fresh copy of it, then paints the
/// animations in declaration order; where rectangles overlap the later animation wins.
#[derive(Clone, Debug)]
pub struct AnimatedTexture {
    target: String,
    base: PixelBuffer,
    canvas: PixelBuffer,
    animations: Vec<Animation>,
    skipped: Vec<SkippedAnimation>,
    cycle_len: u64,
    frame: u64,
    force_next: bool,
}

impl AnimatedTexture {
    /// Compose already-built animations over `base`.
    ///
    /// Fails when an animation's target rectangle does not fit inside `base`.
    pub fn new(
        target: impl Into<String>,
        base: PixelBuffer,
        animations: Vec<Animation>,
    ) -> TexAnimResult<Self> {
        let mut tex = Self::empty(target.into(), base);
        for anim in animations {
            tex.attach(anim)?;
        }
        tex.refresh_cycle_len();
        Ok(tex)
    }

    /// Build every descriptor against `source`, skipping (and logging) the ones that fail.
    ///
    /// A texture whose animations all fail behaves as its unmodified base image.
    #[tracing::instrument(skip_all, fields(texture = %target.as_ref(), descriptors = descriptors.len()))]
    pub fn build(
        target: impl AsRef<str>,
        base: PixelBuffer,
        descriptors: &[AnimationDescriptor],
        source: &mut dyn ImageSource,
    ) -> Self {
        let mut tex = Self::empty(target.as_ref().to_string(), base);
        for (index, desc) in descriptors.iter().enumerate() {
            let built = source
                .load(&desc.source)
                .and_then(|img| Animation::build(desc, img))
                .and_then(|anim| tex.attach(anim));
            if let Err(e) = built {
                tracing::warn!(index, source = %desc.source, error = %e, "skipping animation");
                tex.skipped.push(SkippedAnimation {
                    index,
                    source: desc.source.clone(),
                    reason: e.to_string(),
                });
            }
        }
        tex.refresh_cycle_len();
        tex
    }

    fn empty(target: String, base: PixelBuffer) -> Self {
        Self {
            target,
            canvas: base.clone(),
            base,
            animations: Vec::new(),
            skipped: Vec::new(),
            cycle_len: 1,
            frame: 0,
            force_next: true,
        }
    }

    fn attach(&mut self, mut anim: Animation) -> TexAnimResult<()> {
        let (x, y, w, h) = anim.target_rect();
        if !self.base.contains_rect(x, y, w, h) {
            return Err(TexAnimError::descriptor(format!(
                "target rectangle {w}x{h} at ({x}, {y}) exceeds {}x{} image '{}'",
                self.base.width(),
                self.base.height(),
                self.target
            )));
        }
        anim.convert_source(self.base.format());
        self.animations.push(anim);
        Ok(())
    }

    fn refresh_cycle_len(&mut self) {
        self.cycle_len = combined_cycle_len(&self.animations).unwrap_or(u64::MAX);
    }

    /// Advance by one tick. Returns `true` when the canvas was redrawn.
    ///
    /// The first tick after construction or [`rewind`](Self::rewind) always redraws.
    pub fn tick(&mut self) -> bool {
        let force = std::mem::take(&mut self.force_next);
        self.update_and_draw(force)
    }

    /// Redraw when forced or when anything visible changed, then advance every animation.
    pub fn update_and_draw(&mut self, force: bool) -> bool {
        let mut changed = force;

        if self.can_loop() && self.frame > 0 {
            self.frame = 0;
            changed |= self.cycle_len > 1;
        }
        changed |= self.animations.iter().any(Animation::is_changed);

        if changed {
            self.redraw();
        }

        for anim in &mut self.animations {
            anim.advance();
        }
        self.frame += 1;

        changed
    }

    fn redraw(&mut self) {
        self.canvas.copy_from(&self.base);

        for anim in &self.animations {
            let (x, y, w, h) = anim.target_rect();
            let phase = anim.current_phase();
            match *phase {
                Phase::Static { v, .. } => {
                    copy_rect(anim.source(), 0, v, w, h, &mut self.canvas, x, y)
                }
                Phase::Interpolated { from_v, to_v, .. } => blend_copy_rect(
                    anim.source(),
                    0,
                    from_v,
                    0,
                    to_v,
                    w,
                    h,
                    &mut self.canvas,
                    x,
                    y,
                    phase.blend_at(anim.phase_frame()),
                ),
            }
        }
    }

    /// Put every animation back at frame 0 and restore the base image; the next tick redraws.
    pub fn rewind(&mut self) {
        for anim in &mut self.animations {
            anim.rewind();
        }
        self.canvas.copy_from(&self.base);
        self.frame = 0;
        self.force_next = true;
    }

    /// `true` when every animation is at the start of its own cycle.
    pub fn can_loop(&self) -> bool {
        all_on_frame_zero(&self.animations)
    }

    /// Id of the image the animations are drawn onto.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The current composited image.
    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    /// The pristine base image.
    pub fn base(&self) -> &PixelBuffer {
        &self.base
    }

    /// Animations in draw order.
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Descriptors that failed to build.
    pub fn skipped(&self) -> &[SkippedAnimation] {
        &self.skipped
    }

    /// Ticks since the shared counter last restarted.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Combined cycle (lcm of every animation's cycle), saturating at `u64::MAX`.
    pub fn cycle_len(&self) -> u64 {
        self.cycle_len
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/compositor.rs"]
mod tests;
