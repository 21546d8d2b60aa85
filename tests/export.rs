use std::fs;
use std::path::Path;

use voxport::import::file_stem;
use voxport::obj::{PALETTE_FILE, export_scene};
use voxport::{ImportConfig, ImportError, ModelOutput, import_bytes, import_file};
use voxport_io::FormatError;
use voxport_mesh_cpu::MeshMode;

fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], content: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(content.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(content);
}

fn ints(vals: &[i32]) -> Vec<u8> {
    vals.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn xyzi(voxels: &[[u8; 4]]) -> Vec<u8> {
    let mut c = (voxels.len() as u32).to_le_bytes().to_vec();
    for v in voxels {
        c.extend_from_slice(v);
    }
    c
}

fn ntrn(name: &str) -> Vec<u8> {
    let mut c = ints(&[0]);
    c.extend_from_slice(&1u32.to_le_bytes());
    for s in ["_name", name] {
        c.extend_from_slice(&(s.len() as u32).to_le_bytes());
        c.extend_from_slice(s.as_bytes());
    }
    c.extend(ints(&[1, -1, 0, 0]));
    c
}

/// Two models: a 2x1x1 bar named "Bar" and an unnamed 1x1x1 cube. Colors 1 and 3 match.
fn castle() -> Vec<u8> {
    let mut out = b"VOX ".to_vec();
    out.extend_from_slice(&150u32.to_le_bytes());
    chunk(&mut out, b"MAIN", &[]);
    chunk(&mut out, b"PACK", &ints(&[2]));
    chunk(&mut out, b"SIZE", &ints(&[2, 1, 1]));
    chunk(&mut out, b"XYZI", &xyzi(&[[0, 0, 0, 1], [1, 0, 0, 3]]));
    chunk(&mut out, b"SIZE", &ints(&[1, 1, 1]));
    chunk(&mut out, b"XYZI", &xyzi(&[[0, 0, 0, 2]]));
    chunk(&mut out, b"nTRN", &ntrn("Bar"));
    chunk(
        &mut out,
        b"RGBA",
        &[200, 10, 10, 255, 10, 200, 10, 255, 200, 10, 10, 255],
    );
    out
}

fn write_castle(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("castle.vox");
    fs::write(&path, castle()).unwrap();
    path
}

#[test]
fn imports_models_with_labels() {
    let scene = import_bytes(&castle(), "castle", &ImportConfig::default()).unwrap();
    assert_eq!(scene.version, 150);
    assert_eq!(scene.palette.len(), 3);
    let labels: Vec<&str> = scene.models.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Bar0", "castle1"]);
    assert_eq!(scene.models[0].voxel_count, 2);
    match &scene.models[0].output {
        // two materials, so nothing merges across the bar
        ModelOutput::Mesh(mesh) => assert_eq!(mesh.quad_count(), 10),
        other => panic!("expected a mesh, got {other:?}"),
    }
}

#[test]
fn naive_and_greedy_agree_on_single_material() {
    let naive = ImportConfig {
        mesh_mode: MeshMode::Naive,
        ..ImportConfig::default()
    };
    let scene = import_bytes(&castle(), "castle", &naive).unwrap();
    let ModelOutput::Mesh(mesh) = &scene.models[1].output else {
        panic!("expected a mesh");
    };
    assert_eq!(mesh.quad_count(), 6);
}

#[test]
fn exports_obj_mtl_and_palette() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_castle(dir.path());
    let scene = import_file(&path, &ImportConfig::default()).unwrap();
    let out = dir.path().join("out");
    let written = export_scene(&scene, &out, &file_stem(&path)).unwrap();
    assert_eq!(written.len(), 4);

    let texture = fs::read(out.join(PALETTE_FILE)).unwrap();
    assert_eq!(texture.len(), 256 * 4);
    assert_eq!(&texture[..4], &[200, 10, 10, 255]);

    let mtl = fs::read_to_string(out.join("castle.mtl")).unwrap();
    for name in ["palette_1", "palette_2", "palette_3"] {
        assert!(mtl.contains(&format!("newmtl {name}\n")), "{name} missing");
    }

    let bar = fs::read_to_string(out.join("Bar0.obj")).unwrap();
    assert!(bar.starts_with("mtllib castle.mtl\n"));
    assert_eq!(bar.matches("usemtl ").count(), 2);
    assert_eq!(bar.lines().filter(|l| l.starts_with("vt ")).count(), 40);
    assert!(out.join("castle1.obj").exists());
}

#[test]
fn flat_palette_export_writes_prototypes_and_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_castle(dir.path());
    let config = ImportConfig {
        flat_palette: true,
        ..ImportConfig::default()
    };
    let scene = import_file(&path, &config).unwrap();
    let ModelOutput::Flat(set) = &scene.models[0].output else {
        panic!("expected flat palette output");
    };
    // indices 1 and 3 share a color
    assert_eq!(set.prototypes.len(), 1);

    let out = dir.path().join("flat");
    export_scene(&scene, &out, "castle").unwrap();
    assert!(out.join("Bar0_proto0.obj").exists());
    assert!(!out.join("Bar0_proto1.obj").exists());
    let cells = fs::read_to_string(out.join("Bar0_cells.txt")).unwrap();
    assert_eq!(cells, "0 0 0 0\n1 0 0 0\n");
}

#[test]
fn cell_meshes_export_one_object_per_cell() {
    let config = ImportConfig {
        cell_meshes: true,
        ..ImportConfig::default()
    };
    let scene = import_bytes(&castle(), "castle", &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    export_scene(&scene, dir.path(), "castle").unwrap();
    let bar = fs::read_to_string(dir.path().join("Bar0.obj")).unwrap();
    assert_eq!(bar.matches("\no Bar0_").count(), 2);
    assert_eq!(bar.lines().filter(|l| l.starts_with("f ")).count(), 24);
}

#[test]
fn missing_palette_color_is_an_index_error() {
    let mut bytes = b"VOX ".to_vec();
    bytes.extend_from_slice(&150u32.to_le_bytes());
    chunk(&mut bytes, b"SIZE", &ints(&[1, 1, 1]));
    chunk(&mut bytes, b"XYZI", &xyzi(&[[0, 0, 0, 9]]));
    let scene = import_bytes(&bytes, "lonely", &ImportConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = export_scene(&scene, dir.path(), "lonely").unwrap_err();
    assert!(matches!(err, ImportError::Index(e) if e.index == 9));
}

#[test]
fn bad_archives_surface_format_errors() {
    let err = import_bytes(b"VOXX\x96\0\0\0", "bad", &ImportConfig::default()).unwrap_err();
    assert!(matches!(err, ImportError::Format(FormatError::BadMagic(_))));

    let dir = tempfile::tempdir().unwrap();
    let err = import_file(dir.path().join("nope.vox"), &ImportConfig::default()).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.toml");
    fs::write(&path, "mesh_mode = \"naive\"\ncenter_xy = false\n").unwrap();
    let cfg = ImportConfig::from_path(&path).unwrap();
    assert_eq!(cfg.mesh_mode, MeshMode::Naive);
    assert!(!cfg.center_xy);
    assert!(cfg.palette_uvs);
}
