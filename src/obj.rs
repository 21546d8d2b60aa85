//! Wavefront OBJ/MTL export of an imported scene.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use voxport_mesh_cpu::MeshBuffer;
use voxport_scene::{PaletteIndex, Rgba8};

use crate::error::ImportError;
use crate::import::{ImportedScene, ModelOutput};

pub const PALETTE_FILE: &str = "palette.rgba";

pub fn material_name(index: PaletteIndex) -> String {
    format!("palette_{}", index.get())
}

/// Replaces anything but ASCII alphanumerics, `-` and `_` so a label can be a file name.
pub fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Writes named meshes as objects of one OBJ file. Indices are global across objects.
pub fn write_obj<W: Write>(
    w: &mut W,
    mtllib: &str,
    objects: &[(String, &MeshBuffer)],
) -> io::Result<()> {
    writeln!(w, "mtllib {mtllib}")?;
    let mut base = 1usize;
    for (name, mesh) in objects {
        writeln!(w, "o {name}")?;
        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
        }
        if let Some(uvs) = &mesh.uvs {
            for uv in uvs {
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }
        }
        for n in &mesh.normals {
            writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for group in &mesh.material_groups {
            writeln!(w, "usemtl {}", material_name(group.palette_index))?;
            for tri in mesh.group_indices(group).chunks_exact(3) {
                write!(w, "f")?;
                for &i in tri {
                    let i = base + i as usize;
                    if mesh.uvs.is_some() {
                        write!(w, " {i}/{i}/{i}")?;
                    } else {
                        write!(w, " {i}//{i}")?;
                    }
                }
                writeln!(w)?;
            }
        }
        base += mesh.vertex_count();
    }
    Ok(())
}

pub fn write_mtl<W: Write>(w: &mut W, materials: &[(PaletteIndex, Rgba8)]) -> io::Result<()> {
    for &(index, color) in materials {
        let [r, g, b, a] = color.to_f32();
        writeln!(w, "newmtl {}", material_name(index))?;
        writeln!(w, "Kd {r} {g} {b}")?;
        writeln!(w, "d {a}")?;
        writeln!(w)?;
    }
    Ok(())
}

fn write_file(
    path: PathBuf,
    render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>,
) -> Result<PathBuf, ImportError> {
    let mut buf = Vec::new();
    render(&mut buf).map_err(ImportError::io(&path))?;
    fs::write(&path, &buf).map_err(ImportError::io(&path))?;
    log::debug!("wrote {} ({} bytes)", path.display(), buf.len());
    Ok(path)
}

fn used_indices(scene: &ImportedScene) -> BTreeSet<PaletteIndex> {
    let mut used = BTreeSet::new();
    for model in &scene.models {
        match &model.output {
            ModelOutput::Mesh(mesh) => {
                used.extend(mesh.material_groups.iter().map(|g| g.palette_index));
            }
            ModelOutput::Cells(cells) => {
                for (_, mesh) in cells {
                    used.extend(mesh.material_groups.iter().map(|g| g.palette_index));
                }
            }
            ModelOutput::Flat(set) => {
                used.extend(set.prototypes.iter().map(|p| p.palette_index));
            }
        }
    }
    used
}

/// Writes the palette texture, a shared `.mtl` and one OBJ per model (per prototype in
/// flat-palette mode) into `out_dir`. Returns the written paths.
pub fn export_scene(
    scene: &ImportedScene,
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, ImportError> {
    fs::create_dir_all(out_dir).map_err(ImportError::io(out_dir))?;
    let mut written = Vec::new();

    let texture = scene.palette.texture_rgba8();
    written.push(write_file(out_dir.join(PALETTE_FILE), |w| w.write_all(&texture))?);

    let materials = used_indices(scene)
        .into_iter()
        .map(|index| Ok((index, scene.palette.color(index)?)))
        .collect::<Result<Vec<_>, ImportError>>()?;
    let mtllib = format!("{}.mtl", file_safe(stem));
    written.push(write_file(out_dir.join(&mtllib), |w| write_mtl(w, &materials))?);

    for model in &scene.models {
        let label = file_safe(&model.label);
        match &model.output {
            ModelOutput::Mesh(mesh) => {
                let objects = [(label.clone(), mesh)];
                written.push(write_file(out_dir.join(format!("{label}.obj")), |w| {
                    write_obj(w, &mtllib, &objects)
                })?);
            }
            ModelOutput::Cells(cells) => {
                let objects: Vec<(String, &MeshBuffer)> = cells
                    .iter()
                    .map(|((x, y, z), mesh)| (format!("{label}_{x}_{y}_{z}"), mesh))
                    .collect();
                written.push(write_file(out_dir.join(format!("{label}.obj")), |w| {
                    write_obj(w, &mtllib, &objects)
                })?);
            }
            ModelOutput::Flat(set) => {
                for (k, proto) in set.prototypes.iter().enumerate() {
                    let name = format!("{label}_proto{k}");
                    let objects = [(name.clone(), &proto.mesh)];
                    written.push(write_file(out_dir.join(format!("{name}.obj")), |w| {
                        write_obj(w, &mtllib, &objects)
                    })?);
                }
                written.push(write_file(out_dir.join(format!("{label}_cells.txt")), |w| {
                    for (&(x, y, z), proto) in &set.cells {
                        writeln!(w, "{x} {y} {z} {proto}")?;
                    }
                    Ok(())
                })?);
            }
        }
    }
    log::info!("exported {} files to {}", written.len(), out_dir.display());
    Ok(written)
}
