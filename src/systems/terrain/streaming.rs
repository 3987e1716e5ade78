use bevy::prelude::*;

use super::TerrainHeightModel;
use crate::components::{AircraftState, TerrainLayerKind, TerrainTileComponent};
use crate::resources::terrain::{GroundTextureCatalog, TerrainTileCache, TileDiff};

/// Builds the tile cache for the selected biome once the texture catalog is known.
pub fn setup_tile_cache(
    mut commands: Commands,
    model: Res<TerrainHeightModel>,
    catalog: Res<GroundTextureCatalog>,
) {
    let cache = TerrainTileCache::new(model.biome(), catalog.as_ref());
    info!(
        "Terrain '{}' streaming {} tiles of {} m",
        model.biome().name,
        model.biome().resident_tiles(),
        model.biome().tile_size
    );
    commands.insert_resource(cache);
}

/// Keeps the tiles around the aircraft resident and mirrors them as entities.
pub fn stream_terrain_system(
    mut commands: Commands,
    model: Res<TerrainHeightModel>,
    mut cache: ResMut<TerrainTileCache>,
    aircraft: Query<&AircraftState>,
    tiles: Query<(Entity, &TerrainTileComponent)>,
) {
    let Some(state) = aircraft.iter().next() else {
        return;
    };

    let diff = cache.update(&state.position, &model);
    if diff.is_empty() {
        return;
    }
    apply_tile_diff(&mut commands, &cache, &diff, &tiles);
}

fn apply_tile_diff(
    commands: &mut Commands,
    cache: &TerrainTileCache,
    diff: &TileDiff,
    tiles: &Query<(Entity, &TerrainTileComponent)>,
) {
    for (entity, tile) in tiles.iter() {
        if diff.removed.contains(&tile.key) {
            commands.entity(entity).despawn_recursive();
        }
    }

    for &key in &diff.created {
        let Some(tile) = cache.get(key) else {
            continue;
        };
        let transform = Transform::from_translation(tile.origin);
        commands.spawn((
            TerrainTileComponent::new(key, TerrainLayerKind::Primary),
            transform,
            Name::new(format!("Terrain tile ({}, {})", key.x, key.y)),
        ));
        if tile.secondary.is_some() {
            commands.spawn((
                TerrainTileComponent::new(key, TerrainLayerKind::Secondary),
                transform,
                Name::new(format!("Terrain layer ({}, {})", key.x, key.y)),
            ));
        }
    }
}

/// Bobs animated secondary surfaces (water, lava) around their mean height.
/// Collision keeps using the mean, so this only moves the drawn surface.
pub fn animate_surface_system(
    time: Res<Time>,
    model: Res<TerrainHeightModel>,
    mut tiles: Query<(&TerrainTileComponent, &mut Transform)>,
) {
    let Some(layer) = model.biome().secondary.as_ref() else {
        return;
    };
    if !layer.shaping.is_animated() {
        return;
    }

    let offset = layer.shaping.surface_offset(time.elapsed_secs_f64()) as f32;
    for (tile, mut transform) in tiles.iter_mut() {
        if tile.layer == TerrainLayerKind::Secondary {
            transform.translation.y = offset;
        }
    }
}
