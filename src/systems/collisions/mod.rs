mod probe;

pub use probe::CollisionProbe;
