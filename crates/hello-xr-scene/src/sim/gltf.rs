//! glTF 2.0 / GLB asset inspection
//!
//! The simulated session never uploads geometry, so only the document is
//! validated and the mesh and animation names are kept.

use gltf::Gltf;

use crate::session::SceneError;

/// Names extracted from a glTF asset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GltfSummary {
    pub meshes: Vec<String>,
    pub animations: Vec<String>,
}

fn name_or_index(name: Option<&str>, prefix: &str, index: usize) -> String {
    name.map(str::to_string).unwrap_or_else(|| format!("{prefix}_{index}"))
}

/// Parse a GLB container or a JSON glTF document
pub fn parse(bytes: &[u8]) -> Result<GltfSummary, SceneError> {
    if bytes.is_empty() {
        return Err(SceneError::InvalidAsset("empty asset".to_string()));
    }

    let gltf = Gltf::from_slice(bytes)
        .map_err(|e| SceneError::InvalidAsset(format!("malformed glTF: {e}")))?;

    Ok(GltfSummary {
        meshes: gltf
            .meshes()
            .map(|mesh| name_or_index(mesh.name(), "mesh", mesh.index()))
            .collect(),
        animations: gltf
            .animations()
            .map(|anim| name_or_index(anim.name(), "animation", anim.index()))
            .collect(),
    })
}
