use super::{EffectLayout, EffectParam, ScalarKind};

/// CPU copy of an effect's parameter values, uploaded at draw time.
#[derive(Debug, Clone)]
pub struct StagedParams<T> {
    uniforms: Vec<u8>,
    textures: Vec<Option<T>>,
}

impl<T: Clone> StagedParams<T> {
    pub fn new(layout: &EffectLayout) -> Self {
        let size = layout.uniform.map_or(0, |u| u.size as usize);
        Self {
            uniforms: vec![0; size],
            textures: vec![None; layout.textures.len()],
        }
    }

    pub fn uniform_bytes(&self) -> &[u8] {
        &self.uniforms
    }

    pub fn texture(&self, slot: usize) -> Option<&T> {
        self.textures.get(slot).and_then(Option::as_ref)
    }

    pub fn set_float(&mut self, param: EffectParam, value: f32) {
        match param {
            EffectParam::Scalar { offset, kind } => match kind {
                ScalarKind::Float => self.write(offset, bytemuck::bytes_of(&value)),
                ScalarKind::Sint => self.write(offset, bytemuck::bytes_of(&(value as i32))),
                ScalarKind::Uint => self.write(offset, bytemuck::bytes_of(&(value as u32))),
            },
            EffectParam::Texture { .. } => log::debug!("float written to a texture parameter; ignored"),
        }
    }

    pub fn set_int(&mut self, param: EffectParam, value: i32) {
        match param {
            EffectParam::Scalar { offset, kind } => match kind {
                ScalarKind::Float => self.write(offset, bytemuck::bytes_of(&(value as f32))),
                ScalarKind::Sint => self.write(offset, bytemuck::bytes_of(&value)),
                ScalarKind::Uint => self.write(offset, bytemuck::bytes_of(&(value.max(0) as u32))),
            },
            EffectParam::Texture { .. } => log::debug!("int written to a texture parameter; ignored"),
        }
    }

    pub fn set_texture(&mut self, param: EffectParam, texture: &T) {
        match param {
            EffectParam::Texture { slot } => {
                if let Some(entry) = self.textures.get_mut(slot) {
                    *entry = Some(texture.clone());
                }
            }
            EffectParam::Scalar { .. } => log::debug!("texture written to a scalar parameter; ignored"),
        }
    }

    pub fn set_texture_slot(&mut self, slot: usize, texture: &T) {
        self.set_texture(EffectParam::Texture { slot }, texture);
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) {
        let start = offset as usize;
        match self.uniforms.get_mut(start..start + bytes.len()) {
            Some(dst) => dst.copy_from_slice(bytes),
            None => log::warn!("effect parameter at offset {offset} lies outside the uniform block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{TextureSlot, UniformBlock};

    fn layout() -> EffectLayout {
        EffectLayout {
            params: vec![
                ("gain".into(), EffectParam::Scalar { offset: 0, kind: ScalarKind::Float }),
                ("cells".into(), EffectParam::Scalar { offset: 4, kind: ScalarKind::Sint }),
                ("light".into(), EffectParam::Texture { slot: 0 }),
            ],
            uniform: Some(UniformBlock { binding: 0, size: 16 }),
            textures: vec![TextureSlot { name: "light".into(), binding: 1 }],
            samplers: vec![2],
        }
    }

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        bytemuck::pod_read_unaligned(&bytes[offset..offset + 4])
    }

    fn read_i32(bytes: &[u8], offset: usize) -> i32 {
        bytemuck::pod_read_unaligned(&bytes[offset..offset + 4])
    }

    #[test]
    fn scalars_land_at_their_offsets() {
        let layout = layout();
        let mut staged = StagedParams::<u32>::new(&layout);
        staged.set_float(layout.param("gain").unwrap(), 1.2);
        staged.set_int(layout.param("cells").unwrap(), 8);

        assert_eq!(staged.uniform_bytes().len(), 16);
        assert_eq!(read_f32(staged.uniform_bytes(), 0), 1.2);
        assert_eq!(read_i32(staged.uniform_bytes(), 4), 8);
    }

    #[test]
    fn mismatched_kinds_convert() {
        let layout = layout();
        let mut staged = StagedParams::<u32>::new(&layout);
        staged.set_int(layout.param("gain").unwrap(), 3);
        staged.set_float(layout.param("cells").unwrap(), 2.9);
        assert_eq!(read_f32(staged.uniform_bytes(), 0), 3.0);
        assert_eq!(read_i32(staged.uniform_bytes(), 4), 2);
    }

    #[test]
    fn out_of_range_offsets_are_ignored() {
        let layout = layout();
        let mut staged = StagedParams::<u32>::new(&layout);
        staged.set_float(EffectParam::Scalar { offset: 14, kind: ScalarKind::Float }, 1.0);
        assert!(staged.uniform_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn textures_fill_slots() {
        let layout = layout();
        let mut staged = StagedParams::<u32>::new(&layout);
        assert_eq!(staged.texture(0), None);
        staged.set_texture(layout.param("light").unwrap(), &7);
        assert_eq!(staged.texture(0), Some(&7));
        staged.set_texture_slot(3, &9);
        assert_eq!(staged.texture(3), None);
    }
}
