mod aircraft;

pub use aircraft::{
    judge_model_request, request_aircraft_models, resolve_aircraft_models, AircraftModel,
    ModelRequest, ModelRequestOutcome,
};
