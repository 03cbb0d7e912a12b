//! Render callback seam between the session and a drawing surface.

use std::convert::Infallible;

use crate::core::GameSnapshot;

/// Something that can draw a full frame from a snapshot.
///
/// Called after every state change with the complete current state; there is
/// no partial or diff rendering at this level.
pub trait Render {
    type Error;

    fn render(&mut self, snap: &GameSnapshot) -> Result<(), Self::Error>;
}

impl<R: Render + ?Sized> Render for &mut R {
    type Error = R::Error;

    fn render(&mut self, snap: &GameSnapshot) -> Result<(), Self::Error> {
        (**self).render(snap)
    }
}

/// Adapts a closure into an infallible [`Render`].
pub struct RenderFn<F>(pub F);

/// Wrap a closure as a renderer.
///
/// ```
/// use tui_snake_engine::{render_fn, Render};
/// use tui_snake_core::GameSnapshot;
///
/// let mut frames = 0;
/// let mut r = render_fn(|_snap: &GameSnapshot| frames += 1);
/// r.render(&GameSnapshot::default()).unwrap();
/// drop(r);
/// assert_eq!(frames, 1);
/// ```
pub fn render_fn<F: FnMut(&GameSnapshot)>(f: F) -> RenderFn<F> {
    RenderFn(f)
}

impl<F: FnMut(&GameSnapshot)> Render for RenderFn<F> {
    type Error = Infallible;

    fn render(&mut self, snap: &GameSnapshot) -> Result<(), Self::Error> {
        (self.0)(snap);
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRender;

impl Render for NullRender {
    type Error = Infallible;

    fn render(&mut self, _snap: &GameSnapshot) -> Result<(), Self::Error> {
        Ok(())
    }
}
