use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::{TerrainHeightModel, TileMesh};
use crate::components::{TerrainLayerKind, TerrainTileComponent};
use crate::resources::terrain::{GroundTextures, TerrainTileCache, TileSurface};
use crate::utils::FALLBACK_GROUND_COLOR;

/// Shade of ground that lies below the snow line.
const BARE_GROUND_SHADE: f32 = 0.8;

/// Material handles shared by every tile of a layer.
#[derive(Resource, Debug, Clone)]
pub struct TerrainMaterials {
    pub primary: Handle<StandardMaterial>,
    pub secondary: Option<Handle<StandardMaterial>>,
}

impl TerrainMaterials {
    pub fn for_layer(&self, layer: TerrainLayerKind) -> Option<&Handle<StandardMaterial>> {
        match layer {
            TerrainLayerKind::Primary => Some(&self.primary),
            TerrainLayerKind::Secondary => self.secondary.as_ref(),
        }
    }
}

/// Converts cached tile geometry into a renderable mesh.
pub fn tile_mesh_to_bevy(tile: &TileMesh, tint: Option<[f32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, tile.positions.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, tile.normals.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, tile.uvs.clone())
    .with_inserted_indices(Indices::U32(tile.indices.clone()));

    if !tile.snow.is_empty() || tint.is_some() {
        let base = tint.unwrap_or([1.0; 3]);
        let colors: Vec<[f32; 4]> = (0..tile.vertex_count())
            .map(|i| {
                let cover = tile.snow.get(i).copied();
                vertex_color(base, cover)
            })
            .collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }
    mesh
}

fn vertex_color(base: [f32; 3], snow_cover: Option<f32>) -> [f32; 4] {
    match snow_cover {
        Some(cover) => {
            let shade = BARE_GROUND_SHADE + (1.0 - BARE_GROUND_SHADE) * cover.clamp(0.0, 1.0);
            let mix = |c: f32| c * shade + (1.0 - c * shade) * cover;
            [mix(base[0]), mix(base[1]), mix(base[2]), 1.0]
        }
        None => [base[0], base[1], base[2], 1.0],
    }
}

fn repeating(settings: &mut ImageLoaderSettings) {
    settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
}

fn textured_material(textures: &GroundTextures, asset_server: &AssetServer) -> StandardMaterial {
    let load = |path: &String| -> Handle<Image> {
        asset_server.load_with_settings(path.clone(), repeating)
    };
    let emissive_texture = textures.emissive.as_ref().map(load);
    StandardMaterial {
        base_color_texture: Some(load(&textures.color)),
        normal_map_texture: Some(load(&textures.normal)),
        metallic_roughness_texture: Some(load(&textures.roughness)),
        occlusion_texture: textures.ambient_occlusion.as_ref().map(load),
        depth_map: Some(load(&textures.displacement)),
        parallax_depth_scale: 0.02,
        emissive: if emissive_texture.is_some() {
            LinearRgba::WHITE
        } else {
            LinearRgba::BLACK
        },
        emissive_texture,
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

/// Material for a resolved surface; unknown grounds get a loud magenta.
pub fn surface_material(surface: &TileSurface, asset_server: &AssetServer) -> StandardMaterial {
    match surface {
        TileSurface::Textured(textures) => textured_material(textures, asset_server),
        TileSurface::Fallback { .. } => fallback_material(),
    }
}

pub fn fallback_material() -> StandardMaterial {
    let [r, g, b] = FALLBACK_GROUND_COLOR;
    StandardMaterial::from(Color::srgb(r, g, b))
}

pub fn setup_terrain_materials(
    mut commands: Commands,
    cache: Res<TerrainTileCache>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let primary = materials.add(surface_material(cache.surface(), &asset_server));
    let secondary = cache
        .secondary_surface()
        .map(|surface| materials.add(surface_material(surface, &asset_server)));
    commands.insert_resource(TerrainMaterials { primary, secondary });
}

/// Gives freshly streamed tile entities their mesh and material.
pub fn attach_tile_meshes(
    mut commands: Commands,
    cache: Res<TerrainTileCache>,
    model: Res<TerrainHeightModel>,
    materials: Res<TerrainMaterials>,
    mut meshes: ResMut<Assets<Mesh>>,
    tiles: Query<(Entity, &TerrainTileComponent), Without<Mesh3d>>,
) {
    for (entity, tile) in tiles.iter() {
        let Some(cached) = cache.get(tile.key) else {
            continue;
        };
        let geometry = match tile.layer {
            TerrainLayerKind::Primary => Some(&cached.primary),
            TerrainLayerKind::Secondary => cached.secondary.as_ref(),
        };
        let (Some(geometry), Some(material)) = (geometry, materials.for_layer(tile.layer)) else {
            warn!("Tile {:?} has no {:?} layer to draw", tile.key, tile.layer);
            continue;
        };

        let tint = match tile.layer {
            TerrainLayerKind::Primary => model.biome().tint,
            TerrainLayerKind::Secondary => None,
        };
        let mesh = meshes.add(tile_mesh_to_bevy(geometry, tint));
        commands
            .entity(entity)
            .insert((Mesh3d(mesh), MeshMaterial3d(material.clone())));
    }
}
