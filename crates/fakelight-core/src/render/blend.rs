use std::ops::{Deref, DerefMut};

use crate::host::{BlendFactor, Graphics};

/// Scoped host blend state.
///
/// Pushes the host blend state when created and pops it when dropped, so the
/// pop runs on every exit path, unwinding included. Calls that must see the
/// custom blend go through the scope, which dereferences to the host.
pub struct BlendScope<'a, G: Graphics + ?Sized> {
    gfx: &'a mut G,
}

impl<'a, G: Graphics + ?Sized> BlendScope<'a, G> {
    pub fn push(gfx: &'a mut G) -> Self {
        gfx.blend_state_push();
        Self { gfx }
    }

    /// Pushes the current state, then installs `src`/`dst` for the scope.
    pub fn with_function(gfx: &'a mut G, src: BlendFactor, dst: BlendFactor) -> Self {
        let scope = Self::push(gfx);
        scope.gfx.blend_function(src, dst);
        scope
    }
}

impl<G: Graphics + ?Sized> Deref for BlendScope<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.gfx
    }
}

impl<G: Graphics + ?Sized> DerefMut for BlendScope<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.gfx
    }
}

impl<G: Graphics + ?Sized> Drop for BlendScope<'_, G> {
    fn drop(&mut self) {
        self.gfx.blend_state_pop();
    }
}
