use std::borrow::Cow;
use std::collections::BTreeMap;

use gltf::binary::Glb;
use gltf_json::Index;
use gltf_json::accessor::{ComponentType, GenericComponentType, Type as AccessorType};
use gltf_json::buffer::Target;
use gltf_json::mesh::{Mode, Primitive, Semantic};
use gltf_json::validation::{Checked, USize64};

use crate::error::{HollowError, Result};
use crate::types::IndexedMesh;

/// Serialize an `IndexedMesh` into a binary GLB (glTF 2.0) byte buffer.
///
/// Produces a self-contained GLB with:
/// - 1 buffer (f32 positions followed by indices)
/// - 1 Mesh with 1 Primitive (mode = Triangles)
/// - 1 Node → 1 Scene
///
/// Indices use u16 when vertex_count <= 65535. Positions are narrowed to f32.
pub fn encode_glb(mesh: &IndexedMesh, name: &str) -> Result<Vec<u8>> {
    let mut root = gltf_json::Root {
        asset: gltf_json::Asset {
            version: "2.0".into(),
            generator: Some("mesh-hollow".into()),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bin_data: Vec<u8> = Vec::new();
    let buffer_idx = Index::new(0); // pushed at the end

    // --- Positions ---
    let positions: Vec<[f32; 3]> = mesh
        .vertices
        .iter()
        .map(|v| v.as_vec3().to_array())
        .collect();
    let (pos_min, pos_max) = position_bounds(&positions);

    let pos_view = push_view(
        &mut root,
        &mut bin_data,
        buffer_idx,
        bytemuck::cast_slice(&positions),
        Target::ArrayBuffer,
    );
    let pos_accessor = root.push(gltf_json::Accessor {
        buffer_view: Some(pos_view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(mesh.vertex_count()),
        component_type: Checked::Valid(GenericComponentType(ComponentType::F32)),
        type_: Checked::Valid(AccessorType::Vec3),
        min: Some(serde_json::json!(pos_min)),
        max: Some(serde_json::json!(pos_max)),
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    let mut attributes = BTreeMap::new();
    attributes.insert(Checked::Valid(Semantic::Positions), pos_accessor);

    // --- Indices (u16 when vertex_count <= 65535, else u32) ---
    let use_u16_indices = mesh.vertex_count() <= 65535;
    let flat: Vec<u32> = mesh.faces.iter().flatten().copied().collect();
    let idx_view = if use_u16_indices {
        let idx_u16: Vec<u16> = flat.iter().map(|&i| i as u16).collect();
        push_view(
            &mut root,
            &mut bin_data,
            buffer_idx,
            bytemuck::cast_slice(&idx_u16),
            Target::ElementArrayBuffer,
        )
    } else {
        push_view(
            &mut root,
            &mut bin_data,
            buffer_idx,
            bytemuck::cast_slice(&flat),
            Target::ElementArrayBuffer,
        )
    };
    let idx_component_type = if use_u16_indices {
        ComponentType::U16
    } else {
        ComponentType::U32
    };

    let idx_accessor = root.push(gltf_json::Accessor {
        buffer_view: Some(idx_view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(flat.len()),
        component_type: Checked::Valid(GenericComponentType(idx_component_type)),
        type_: Checked::Valid(AccessorType::Scalar),
        min: None,
        max: None,
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    // --- Mesh ---
    let primitive = Primitive {
        attributes,
        indices: Some(idx_accessor),
        material: None,
        mode: Checked::Valid(Mode::Triangles),
        targets: None,
        extensions: Default::default(),
        extras: Default::default(),
    };

    let mesh_idx = root.push(gltf_json::Mesh {
        primitives: vec![primitive],
        weights: None,
        name: Some(name.to_string()),
        extensions: Default::default(),
        extras: Default::default(),
    });

    let node_idx = root.push(gltf_json::Node {
        mesh: Some(mesh_idx),
        ..Default::default()
    });

    let scene_idx = root.push(gltf_json::Scene {
        nodes: vec![node_idx],
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene_idx);

    // --- Buffer ---
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }
    root.push(gltf_json::Buffer {
        byte_length: USize64::from(bin_data.len()),
        uri: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    // --- Assemble GLB ---
    let json_string = gltf_json::serialize::to_string(&root)
        .map_err(|e| HollowError::Export(format!("Failed to serialize glTF JSON: {e}")))?;
    let mut json_bytes = json_string.into_bytes();
    // JSON chunk is padded with spaces
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let glb = Glb {
        header: gltf::binary::Header {
            magic: *b"glTF",
            version: 2,
            length: (12 + 8 + json_bytes.len() + 8 + bin_data.len()) as u32,
        },
        json: Cow::Owned(json_bytes),
        bin: Some(Cow::Owned(bin_data)),
    };

    glb.to_vec()
        .map_err(|e| HollowError::Export(format!("Failed to assemble GLB: {e}")))
}

/// Append `bytes` to the binary chunk at a 4-byte boundary and register a view.
fn push_view(
    root: &mut gltf_json::Root,
    bin_data: &mut Vec<u8>,
    buffer_idx: Index<gltf_json::Buffer>,
    bytes: &[u8],
    target: Target,
) -> Index<gltf_json::buffer::View> {
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }
    let byte_offset = bin_data.len();
    bin_data.extend_from_slice(bytes);

    root.push(gltf_json::buffer::View {
        buffer: buffer_idx,
        byte_length: USize64::from(bytes.len()),
        byte_offset: Some(USize64::from(byte_offset)),
        byte_stride: None,
        name: None,
        target: Some(Checked::Valid(target)),
        extensions: Default::default(),
        extras: Default::default(),
    })
}

fn position_bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (min, max)
}
