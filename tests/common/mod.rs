mod assertions;
mod test_app;

pub use assertions::{assert_state_finite, assert_within_runway};
pub use test_app::{RecordedEvents, TestApp, TestAppBuilder};
