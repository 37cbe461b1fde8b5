use std::path::Path;

use fakelight_core::error::LoadError;

use super::{FRAGMENT_ENTRY, VERTEX_ENTRY};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScalarKind {
    Float,
    Sint,
    Uint,
}

/// Handle to one named effect input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EffectParam {
    /// 32-bit member of the uniform block at `offset` bytes.
    Scalar { offset: u32, kind: ScalarKind },
    /// Index into [`EffectLayout::textures`].
    Texture { slot: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformBlock {
    pub binding: u32,
    /// Buffer size, rounded up to 16 bytes.
    pub size: u32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextureSlot {
    pub name: String,
    pub binding: u32,
}

/// Resource interface of an effect module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectLayout {
    pub params: Vec<(String, EffectParam)>,
    pub uniform: Option<UniformBlock>,
    pub textures: Vec<TextureSlot>,
    pub samplers: Vec<u32>,
}

impl EffectLayout {
    pub fn param(&self, name: &str) -> Option<EffectParam> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
    }

    pub fn texture_slot(&self, name: &str) -> Option<usize> {
        self.textures.iter().position(|t| t.name == name)
    }
}

fn parse_error(path: &Path, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Parses and validates `source`, then extracts its parameter interface.
///
/// `path` only labels errors.
pub fn reflect(path: &Path, source: &str) -> Result<EffectLayout, LoadError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| parse_error(path, e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| parse_error(path, e.emit_to_string(source)))?;

    for (entry, stage) in [
        (VERTEX_ENTRY, naga::ShaderStage::Vertex),
        (FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
    ] {
        if !module
            .entry_points
            .iter()
            .any(|ep| ep.name == entry && ep.stage == stage)
        {
            return Err(LoadError::MissingEntryPoint {
                path: path.to_path_buf(),
                entry_point: entry.to_owned(),
            });
        }
    }

    let mut layout = EffectLayout::default();

    for (_, var) in module.global_variables.iter() {
        let Some(binding) = var.binding.as_ref() else { continue };
        let name = var.name.clone().unwrap_or_default();
        if binding.group != 0 {
            return Err(parse_error(
                path,
                format!("`{name}` is in bind group {}; only group 0 is supported", binding.group),
            ));
        }

        match (var.space, &module.types[var.ty].inner) {
            (naga::AddressSpace::Uniform, naga::TypeInner::Struct { members, span }) => {
                if layout.uniform.is_some() {
                    return Err(parse_error(path, "more than one uniform block"));
                }
                layout.uniform = Some(UniformBlock {
                    binding: binding.binding,
                    size: span.div_ceil(16).max(1) * 16,
                });
                for member in members {
                    let Some(member_name) = member.name.as_ref() else { continue };
                    match scalar_kind(&module.types[member.ty].inner) {
                        Some(kind) => layout.params.push((
                            member_name.clone(),
                            EffectParam::Scalar {
                                offset: member.offset,
                                kind,
                            },
                        )),
                        None => log::debug!("effect member `{member_name}` is not a 32-bit scalar; not addressable"),
                    }
                }
            }
            (
                naga::AddressSpace::Handle,
                naga::TypeInner::Image {
                    dim: naga::ImageDimension::D2,
                    arrayed: false,
                    class: naga::ImageClass::Sampled { multi: false, .. },
                },
            ) => {
                let slot = layout.textures.len();
                layout.params.push((name.clone(), EffectParam::Texture { slot }));
                layout.textures.push(TextureSlot {
                    name,
                    binding: binding.binding,
                });
            }
            (naga::AddressSpace::Handle, naga::TypeInner::Sampler { comparison: false }) => {
                layout.samplers.push(binding.binding);
            }
            _ => {
                return Err(parse_error(
                    path,
                    format!("unsupported resource `{name}` at binding {}", binding.binding),
                ));
            }
        }
    }

    Ok(layout)
}

fn scalar_kind(inner: &naga::TypeInner) -> Option<ScalarKind> {
    let naga::TypeInner::Scalar(scalar) = inner else { return None };
    if scalar.width != 4 {
        return None;
    }
    match scalar.kind {
        naga::ScalarKind::Float => Some(ScalarKind::Float),
        naga::ScalarKind::Sint => Some(ScalarKind::Sint),
        naga::ScalarKind::Uint => Some(ScalarKind::Uint),
        _ => None,
    }
}
