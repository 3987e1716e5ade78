use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::components::{AircraftProfile, ModelSpec};
use crate::resources::{SessionState, SessionToken};
use crate::systems::terrain::fallback_material;

/// An aircraft model load started during the session generation in `token`.
#[derive(Component, Debug, Clone)]
pub struct ModelRequest {
    pub handle: Handle<Scene>,
    pub token: SessionToken,
}

/// The aircraft already has something drawn for it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AircraftModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRequestOutcome {
    Pending,
    Attach,
    Fallback,
    /// Started before a restart; must not touch the new session.
    Discard,
}

pub fn judge_model_request(
    session: &SessionState,
    token: SessionToken,
    loaded: bool,
    failed: bool,
) -> ModelRequestOutcome {
    if !session.accepts(token) {
        ModelRequestOutcome::Discard
    } else if failed {
        ModelRequestOutcome::Fallback
    } else if loaded {
        ModelRequestOutcome::Attach
    } else {
        ModelRequestOutcome::Pending
    }
}

fn model_transform(spec: &ModelSpec) -> Transform {
    let [rx, ry, rz] = spec.rotation;
    Transform::from_translation(Vec3::from_array(spec.offset))
        .with_rotation(Quat::from_euler(EulerRot::XYZ, rx, ry, rz))
        .with_scale(Vec3::splat(spec.scale))
}

fn spawn_placeholder(
    commands: &mut Commands,
    aircraft: Entity,
    profile: &AircraftProfile,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let body = profile.body;
    let mesh = meshes.add(Cuboid::new(
        2.0 * body.half_width as f32,
        2.0 * body.half_height as f32,
        2.0 * body.half_depth as f32,
    ));
    let material = materials.add(fallback_material());
    commands
        .entity(aircraft)
        .insert((AircraftModel, Visibility::default()))
        .with_children(|parent| {
            parent.spawn((Mesh3d(mesh), MeshMaterial3d(material)));
        });
}

/// Starts loading the model of every aircraft that has nothing drawn yet.
pub fn request_aircraft_models(
    mut commands: Commands,
    session: Res<SessionState>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    aircraft: Query<(Entity, &AircraftProfile), (Without<ModelRequest>, Without<AircraftModel>)>,
) {
    for (entity, profile) in aircraft.iter() {
        let Some(spec) = profile.model.as_ref() else {
            warn!("{} has no model, drawing a placeholder", profile.name);
            spawn_placeholder(&mut commands, entity, profile, &mut meshes, &mut materials);
            continue;
        };

        debug!("Loading model {} for {}", spec.path, profile.name);
        let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(spec.path.clone()));
        commands.entity(entity).insert(ModelRequest {
            handle,
            token: session.token(),
        });
    }
}

/// Attaches finished loads, drops ones from an earlier session and falls
/// back to a box when the file could not be loaded.
pub fn resolve_aircraft_models(
    mut commands: Commands,
    session: Res<SessionState>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    requests: Query<(Entity, &AircraftProfile, &ModelRequest)>,
) {
    for (entity, profile, request) in requests.iter() {
        let failed = matches!(
            asset_server.get_load_state(&request.handle),
            Some(LoadState::Failed(_))
        );
        let loaded = asset_server.is_loaded_with_dependencies(&request.handle);

        match judge_model_request(&session, request.token, loaded, failed) {
            ModelRequestOutcome::Pending => {}
            ModelRequestOutcome::Discard => {
                debug!(
                    "Discarding model load from generation {}",
                    request.token.generation()
                );
                commands.entity(entity).remove::<ModelRequest>();
            }
            ModelRequestOutcome::Fallback => {
                error!("Failed to load model for {}, drawing a placeholder", profile.name);
                commands.entity(entity).remove::<ModelRequest>();
                spawn_placeholder(&mut commands, entity, profile, &mut meshes, &mut materials);
            }
            ModelRequestOutcome::Attach => {
                let transform = profile
                    .model
                    .as_ref()
                    .map(model_transform)
                    .unwrap_or_default();
                commands
                    .entity(entity)
                    .remove::<ModelRequest>()
                    .insert((AircraftModel, Visibility::default()))
                    .with_children(|parent| {
                        parent.spawn((SceneRoot(request.handle.clone()), transform));
                    });
            }
        }
    }
}
