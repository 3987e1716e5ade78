use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use skyward::{
    components::{AircraftSource, AircraftState, AircraftType, FlightCommand, FlightEvent},
    plugins::{SimulationPlugin, SimulationSet},
    resources::{
        terrain::{MapSource, MapType},
        PauseRequest, RestartRequest, SimulationConfig,
    },
};
use std::time::Duration;

/// Every `FlightEvent` seen since the app was built.
#[derive(Resource, Debug, Default)]
pub struct RecordedEvents(pub Vec<FlightEvent>);

fn record_events(mut reader: EventReader<FlightEvent>, mut recorded: ResMut<RecordedEvents>) {
    recorded.0.extend(reader.read().cloned());
}

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    config: SimulationConfig,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: SimulationConfig {
                seed: Some(42),
                aircraft: AircraftSource::Programmed(AircraftType::Cessna),
                map: MapSource::Programmed(MapType::Desert),
                frame_time: 1.0 / 60.0,
                ..Default::default()
            },
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aircraft(mut self, aircraft: AircraftType) -> Self {
        self.config.aircraft = AircraftSource::Programmed(aircraft);
        self
    }

    pub fn with_map(mut self, map: MapSource) -> Self {
        self.config.map = map;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
                self.config.frame_time,
            )))
            .init_resource::<RecordedEvents>()
            .add_plugins(SimulationPlugin::new(self.config))
            .add_systems(Update, record_events.after(SimulationSet::Flight));

        // Run startup and settle the first zero-length frame
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    pub fn get_resource<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn query_single_mut<T: Component>(&mut self) -> Option<Mut<T>> {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut T>();
        query.get_single_mut(world).ok()
    }

    pub fn query_all<T: Component>(&mut self) -> Vec<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.iter(world).collect()
    }

    pub fn state(&mut self) -> AircraftState {
        self.query_single::<AircraftState>()
            .cloned()
            .expect("exactly one aircraft")
    }

    pub fn command(&mut self, command: FlightCommand) {
        if let Some(mut current) = self.query_single_mut::<FlightCommand>() {
            *current = command;
        }
    }

    pub fn edit_state(&mut self, edit: impl FnOnce(&mut AircraftState)) {
        if let Some(mut state) = self.query_single_mut::<AircraftState>() {
            edit(&mut state);
        }
    }

    pub fn restart(&mut self) {
        self.app.world_mut().send_event(RestartRequest);
        self.app.update();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.app.world_mut().send_event(PauseRequest { paused });
        self.app.update();
    }

    pub fn events(&self) -> &[FlightEvent] {
        &self.app.world().resource::<RecordedEvents>().0
    }
}
