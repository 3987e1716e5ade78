use nalgebra::Vector3;

use crate::resources::terrain::RunwayConfig;
use crate::systems::terrain::TerrainHeightModel;

/// Answers point queries against the terrain for one session.
#[derive(Debug, Clone, Copy)]
pub struct CollisionProbe<'a> {
    terrain: &'a TerrainHeightModel,
}

impl<'a> CollisionProbe<'a> {
    pub fn new(terrain: &'a TerrainHeightModel) -> Self {
        Self { terrain }
    }

    pub fn runway(&self) -> &RunwayConfig {
        self.terrain.runway()
    }

    /// True when `point` is inside solid ground or a secondary layer. The runway
    /// surface itself never collides.
    pub fn is_ground_collision(&self, point: &Vector3<f64>) -> bool {
        if self.is_on_runway(point) {
            return false;
        }

        if point.y < self.terrain.height(point.x, point.z) {
            return true;
        }

        match self.terrain.biome().secondary.as_ref() {
            Some(layer) => {
                let surface = self.terrain.layer_height(layer, point.x, point.z);
                if layer.inverted {
                    point.y > surface
                } else {
                    point.y < surface
                }
            }
            None => false,
        }
    }

    pub fn is_on_runway(&self, point: &Vector3<f64>) -> bool {
        self.runway().contains(point.x, point.z)
    }

    pub fn count_collisions<I>(&self, points: I) -> usize
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        points
            .into_iter()
            .filter(|point| self.is_ground_collision(point))
            .count()
    }

    /// Height of `point` above the primary ground; negative when buried.
    pub fn terrain_clearance(&self, point: &Vector3<f64>) -> f64 {
        point.y - self.terrain.height(point.x, point.z)
    }
}
