use std::rc::Rc;

use crate::render::GpuTexture;

/// Whether an element is listed as a source or as a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SourceKind {
    Input,
    Scene,
}

/// A named element of the studio scene graph.
///
/// The image is drawn stretched to the element's base size.
#[derive(Debug)]
pub struct SceneSource {
    name: String,
    kind: SourceKind,
    width: u32,
    height: u32,
    image: GpuTexture,
}

pub type SourceRef = Rc<SceneSource>;

impl SceneSource {
    pub(crate) fn new(name: &str, kind: SourceKind, width: u32, height: u32, image: GpuTexture) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            width,
            height,
            image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn image(&self) -> &GpuTexture {
        &self.image
    }
}
