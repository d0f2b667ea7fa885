use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::scene::SceneGraph;
use crate::tessellation::{SceneMesh, TessellateScene};

/// File name of the exported model.
pub const GLB_FILE_NAME: &str = "floorplan.glb";

/// MIME type of the exported model.
pub const GLB_MIME_TYPE: &str = "model/gltf-binary";

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const MODE_TRIANGLES: u32 = 4;

/// A serialized GLB file ready to be saved or offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl GlbArtifact {
    /// Writes the artifact into `dir` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote GLB export");
        Ok(path)
    }
}

/// Serializes the shown meshes of a scene into a binary glTF 2.0 file.
///
/// Every mesh node becomes one glTF node with its geometry baked into world
/// space. Labels and lights are not exported.
pub struct ExportGlb<'a> {
    scene: Option<&'a SceneGraph>,
}

impl<'a> ExportGlb<'a> {
    /// Creates a new `ExportGlb` operation.
    #[must_use]
    pub fn new(scene: Option<&'a SceneGraph>) -> Self {
        Self { scene }
    }

    /// Executes the export.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoScene` when no scene is attached, and other
    /// variants if tessellation or serialization fails. A scene with nothing
    /// shown still exports, as a file without nodes.
    pub fn execute(&self) -> Result<GlbArtifact, ExportError> {
        let result = self.serialize();
        if let Err(err) = &result {
            warn!(error = %err, "GLB export failed");
        }
        result
    }

    /// Executes the export and writes the file into `dir`.
    ///
    /// Nothing is written unless serialization succeeds.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ExportGlb::execute`], plus
    /// `ExportError::Io` if the file cannot be written.
    pub fn execute_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.execute()?.write_to_dir(dir)
    }

    fn serialize(&self) -> Result<GlbArtifact, ExportError> {
        let scene = self.scene.ok_or(ExportError::NoScene)?;
        let meshes = TessellateScene::new(scene)
            .execute()
            .map_err(|e| ExportError::Tessellation(Box::new(e)))?;

        let (gltf, bin) = build_document(&meshes);
        let json = serde_json::to_vec(&gltf)?;
        let bytes = write_glb(json, bin)?;
        info!(meshes = meshes.len(), bytes = bytes.len(), "exported GLB");
        Ok(GlbArtifact {
            file_name: GLB_FILE_NAME,
            mime_type: GLB_MIME_TYPE,
            bytes,
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn build_document(meshes: &[SceneMesh]) -> (serde_json::Value, Vec<u8>) {
    let mut bin = Vec::new();
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut materials = Vec::new();
    let mut nodes = Vec::new();

    let mut push_view = |bin: &mut Vec<u8>, data: Vec<u8>, target: u32| {
        let offset = bin.len();
        let length = data.len();
        bin.extend_from_slice(&data);
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": length,
            "target": target,
        }));
        buffer_views.len() - 1
    };

    for (i, item) in meshes.iter().filter(|m| !m.mesh.is_empty()).enumerate() {
        let mesh = &item.mesh;
        let positions: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .flat_map(f32::to_le_bytes)
            .collect();
        let normals: Vec<u8> = mesh
            .normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .flat_map(f32::to_le_bytes)
            .collect();
        let uvs: Vec<u8> = mesh
            .uvs
            .iter()
            .flat_map(|t| [t.x as f32, t.y as f32])
            .flat_map(f32::to_le_bytes)
            .collect();
        let indices: Vec<u8> = mesh
            .indices
            .iter()
            .flatten()
            .flat_map(|index| index.to_le_bytes())
            .collect();

        let (min, max) = mesh
            .bounds()
            .map_or(([0.0; 3], [0.0; 3]), |b| {
                ([b.min.x, b.min.y, b.min.z], [b.max.x, b.max.y, b.max.z])
            });
        let count = mesh.vertex_count();

        let position_view = push_view(&mut bin, positions, TARGET_ARRAY_BUFFER);
        let normal_view = push_view(&mut bin, normals, TARGET_ARRAY_BUFFER);
        let uv_view = push_view(&mut bin, uvs, TARGET_ARRAY_BUFFER);
        let index_view = push_view(&mut bin, indices, TARGET_ELEMENT_ARRAY_BUFFER);

        let base = accessors.len();
        accessors.push(json!({
            "bufferView": position_view,
            "componentType": COMPONENT_FLOAT,
            "count": count,
            "type": "VEC3",
            "min": min,
            "max": max,
        }));
        accessors.push(json!({
            "bufferView": normal_view,
            "componentType": COMPONENT_FLOAT,
            "count": count,
            "type": "VEC3",
        }));
        accessors.push(json!({
            "bufferView": uv_view,
            "componentType": COMPONENT_FLOAT,
            "count": count,
            "type": "VEC2",
        }));
        accessors.push(json!({
            "bufferView": index_view,
            "componentType": COMPONENT_UNSIGNED_INT,
            "count": mesh.triangle_count() * 3,
            "type": "SCALAR",
        }));

        let material = &item.material;
        let [r, g, b] = material.color.to_linear();
        let mut gltf_material = json!({
            "name": item.name,
            "pbrMetallicRoughness": {
                "baseColorFactor": [r, g, b, material.opacity],
                "metallicFactor": 0.0,
                "roughnessFactor": 1.0,
            },
            "doubleSided": true,
        });
        if material.is_transparent() {
            gltf_material["alphaMode"] = json!("BLEND");
        }
        if let Some(texture) = &material.texture {
            gltf_material["extras"] = json!({ "texture": texture });
        }
        materials.push(gltf_material);

        gltf_meshes.push(json!({
            "name": item.name,
            "primitives": [{
                "attributes": {
                    "POSITION": base,
                    "NORMAL": base + 1,
                    "TEXCOORD_0": base + 2,
                },
                "indices": base + 3,
                "material": i,
                "mode": MODE_TRIANGLES,
            }],
        }));
        nodes.push(json!({ "name": item.name, "mesh": i }));
    }

    let mut gltf = json!({
        "asset": { "version": "2.0", "generator": concat!("floorplan ", env!("CARGO_PKG_VERSION")) },
        "scene": 0,
        "scenes": [{ "name": "floorplan", "nodes": (0..nodes.len()).collect::<Vec<_>>() }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "materials": materials,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": bin.len() }],
    });
    // glTF buffers must be at least one byte long.
    if bin.is_empty() {
        if let Some(doc) = gltf.as_object_mut() {
            doc.remove("buffers");
        }
    }
    (gltf, bin)
}

/// Frames a JSON and a binary chunk as a GLB container.
fn write_glb(mut json: Vec<u8>, mut bin: Vec<u8>) -> Result<Vec<u8>, ExportError> {
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let total = 12 + 8 + json.len() + 8 + bin.len();
    let total_len = u32::try_from(total).map_err(|_| ExportError::TooLarge(total))?;
    let json_len = u32::try_from(json.len()).map_err(|_| ExportError::TooLarge(total))?;
    let bin_len = u32::try_from(bin.len()).map_err(|_| ExportError::TooLarge(total))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(GLB_MAGIC);
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total_len.to_le_bytes());
    out.extend_from_slice(&json_len.to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);
    out.extend_from_slice(&bin_len.to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::layout::{Layout, Room, RoomFilter};
    use crate::operations::{Appearance, BuildFloorplan};

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn floorplan(show_ceiling: bool) -> SceneGraph {
        let config = ViewerConfig::default();
        let mut look = Appearance::from_config(&config);
        look.show_ceiling = show_ceiling;
        let layout = Layout::new(vec![Room::new("Bedroom", 0.0, 0.0, 4.0, 3.0).with_id("r1")]).unwrap();
        BuildFloorplan::new(&layout, RoomFilter::default(), &look, &config)
            .execute()
            .unwrap()
            .scene
    }

    fn parse(bytes: &[u8]) -> serde_json::Value {
        let json_len = read_u32(bytes, 12) as usize;
        serde_json::from_slice(&bytes[20..20 + json_len]).unwrap()
    }

    #[test]
    fn header_and_chunks_are_well_formed() {
        let scene = floorplan(true);
        let artifact = ExportGlb::new(Some(&scene)).execute().unwrap();
        let bytes = &artifact.bytes;
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(read_u32(bytes, 4), 2);
        assert_eq!(read_u32(bytes, 8) as usize, bytes.len());

        let json_len = read_u32(bytes, 12) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(read_u32(bytes, 16), CHUNK_JSON);
        let bin_header = 20 + json_len;
        let bin_len = read_u32(bytes, bin_header) as usize;
        assert_eq!(bin_len % 4, 0);
        assert_eq!(read_u32(bytes, bin_header + 4), CHUNK_BIN);
        assert_eq!(bin_header + 8 + bin_len, bytes.len());

        assert_eq!(artifact.file_name, "floorplan.glb");
        assert_eq!(artifact.mime_type, "model/gltf-binary");
    }

    #[test]
    fn one_node_per_visible_mesh() {
        let scene = floorplan(true);
        let gltf = parse(&ExportGlb::new(Some(&scene)).execute().unwrap().bytes);
        // Floor, four walls, ceiling and door.
        assert_eq!(gltf["nodes"].as_array().unwrap().len(), 7);
        assert_eq!(gltf["asset"]["version"], "2.0");
        let ceiling = gltf["materials"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == "ceiling:r1")
            .unwrap();
        assert_eq!(ceiling["alphaMode"], "BLEND");
    }

    #[test]
    fn hidden_ceiling_is_left_out() {
        let scene = floorplan(false);
        let gltf = parse(&ExportGlb::new(Some(&scene)).execute().unwrap().bytes);
        assert_eq!(gltf["nodes"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn missing_scene_is_reported() {
        let err = ExportGlb::new(None).execute().unwrap_err();
        assert!(matches!(err, ExportError::NoScene));
        assert_eq!(err.alert_message(), "Scene not found!");
    }

    #[test]
    fn empty_scene_exports_without_nodes() {
        let scene = SceneGraph::new();
        let bytes = ExportGlb::new(Some(&scene)).execute().unwrap().bytes;
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(read_u32(&bytes, 8) as usize, bytes.len());

        let json_len = read_u32(&bytes, 12) as usize;
        let bin_header = 20 + json_len;
        assert_eq!(read_u32(&bytes, bin_header), 0);
        assert_eq!(read_u32(&bytes, bin_header + 4), CHUNK_BIN);
        assert_eq!(bin_header + 8, bytes.len());

        let gltf = parse(&bytes);
        assert!(gltf["nodes"].as_array().unwrap().is_empty());
        assert!(gltf["meshes"].as_array().unwrap().is_empty());
        assert!(gltf["scenes"][0]["nodes"].as_array().unwrap().is_empty());
        assert!(gltf.get("buffers").is_none());
    }

    #[test]
    fn lawn_only_layout_still_exports() {
        let config = ViewerConfig::default();
        let layout = Layout::new(vec![Room::new("Lawn", 0.0, 0.0, 4.0, 3.0)]).unwrap();
        let scene = BuildFloorplan::new(
            &layout,
            RoomFilter::default(),
            &Appearance::from_config(&config),
            &config,
        )
        .execute()
        .unwrap()
        .scene;
        let gltf = parse(&ExportGlb::new(Some(&scene)).execute().unwrap().bytes);
        assert_eq!(gltf["nodes"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn writes_file_after_success() {
        let scene = floorplan(true);
        let dir = std::env::temp_dir().join(format!("floorplan-ok-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = ExportGlb::new(Some(&scene)).execute_to_dir(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), GLB_FILE_NAME);
        assert_eq!(&std::fs::read(&path).unwrap()[0..4], b"glTF");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
