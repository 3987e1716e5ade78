use bevy::prelude::*;
use nalgebra::UnitQuaternion;

use super::{controls, forces, ground, warnings};
use crate::components::{
    AircraftProfile, AircraftState, CrashKind, CrashRecord, FlightCommand, FlightEvent, Milestone,
};
use crate::resources::{MilestoneLedger, PhysicsConfig};
use crate::systems::collisions::CollisionProbe;
use crate::utils::{ALTITUDE_MILESTONES, DISPLAY_SPEED_FACTOR, NOSE_DIVE_SPEED};

/// What one step produced besides the state change itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub events: Vec<FlightEvent>,
    pub message: Option<String>,
}

/// Arcade flight model for a single aircraft against one terrain.
pub struct FlightDynamics<'a> {
    profile: &'a AircraftProfile,
    physics: &'a PhysicsConfig,
    probe: CollisionProbe<'a>,
}

impl<'a> FlightDynamics<'a> {
    pub fn new(
        profile: &'a AircraftProfile,
        physics: &'a PhysicsConfig,
        probe: CollisionProbe<'a>,
    ) -> Self {
        Self {
            profile,
            physics,
            probe,
        }
    }

    /// Advances `state` by `delta_time` seconds (clamped). A crashed aircraft is frozen.
    pub fn step(
        &self,
        state: &mut AircraftState,
        command: &FlightCommand,
        delta_time: f64,
        ledger: &mut MilestoneLedger,
    ) -> StepReport {
        let mut report = StepReport::default();
        if state.flags.is_crashed {
            return report;
        }
        let dt = self.physics.clamp_delta(delta_time);

        controls::apply_command(state, command, self.profile, dt);
        if state.flags.engine_off {
            state.thrust = 0.0;
        }

        // Touchdown is judged on the motion entering the frame
        let speed = state.speed();
        let sink_rate = state.velocity.y.abs();
        let on_runway = self.probe.is_on_runway(&state.position);
        let force = forces::net_force(state, self.profile, self.physics, on_runway);

        state.velocity *= self.physics.velocity_damping;
        state.angular_velocity *= self.physics.angular_damping;
        state.velocity += force * dt;

        let touching = ground::is_touching_ground(state, self.profile, self.physics);
        if touching && on_runway {
            if self.profile.retractable_gear && !state.flags.gear_deployed {
                self.crash_into(state, "Landing failed! Gear not deployed.", ledger, &mut report);
                return report;
            }

            if !state.flags.is_on_ground && state.flags.confirmed_airborne {
                if let Err(reason) = ground::judge_landing(speed, sink_rate, self.profile) {
                    self.crash_into(state, &reason, ledger, &mut report);
                    return report;
                }

                info!("Landed at {:.1} m/s, sinking {:.2} m/s", speed, sink_rate);
                report.message = Some("Landed Successfully!".to_string());
                state.flags.has_been_airborne = false;
                state.flags.confirmed_airborne = false;
                state.timers.airborne = 0.0;
                report.events.push(FlightEvent::Landed { speed, sink_rate });
                Self::award(Milestone::FirstLanding, ledger, &mut report);
            } else if !state.flags.has_been_airborne {
                report.message = Some(format!(
                    "On Runway. Speed: {:.1} (Need ~{} to lift)",
                    speed * DISPLAY_SPEED_FACTOR,
                    self.profile.takeoff_speed * DISPLAY_SPEED_FACTOR
                ));
            } else {
                report.message = Some(format!(
                    "On Ground. Speed: {:.1}",
                    speed * DISPLAY_SPEED_FACTOR
                ));
            }

            ground::settle_on_runway(state, self.profile, self.physics, speed, dt);
        } else if touching {
            // Off the runway the terrain collision decides what happens
            report.message = Some("Flying".to_string());
            state.flags.is_on_ground = false;
            state.timers.airborne = 0.0;
        } else {
            state.timers.airborne += dt;
            if state.timers.airborne >= self.profile.airborne_confirmation_time
                && !state.flags.confirmed_airborne
            {
                state.flags.confirmed_airborne = true;
                state.flags.has_been_airborne = true;
                info!("Airborne at {:.1} m", state.altitude());
                report.message = Some("Airborne!".to_string());
                report.events.push(FlightEvent::Airborne);
                Self::award(Milestone::FirstFlight, ledger, &mut report);
            } else if state.flags.confirmed_airborne {
                report.message = Some("Flying".to_string());
            }
            state.flags.is_on_ground = false;
        }

        let outcome = warnings::evaluate(
            state,
            &self.probe,
            self.physics,
            self.profile,
            on_runway,
            dt,
        );
        if outcome.message.is_some() {
            report.message = outcome.message;
        }
        if outcome.ground_hugger {
            Self::award(Milestone::GroundHugger, ledger, &mut report);
        }

        for threshold in ALTITUDE_MILESTONES {
            if state.altitude() >= threshold as f64 {
                Self::award(Milestone::Altitude(threshold), ledger, &mut report);
            }
        }
        if state.velocity.y <= -NOSE_DIVE_SPEED {
            Self::award(Milestone::NoseDiver, ledger, &mut report);
        }

        state.position += state.velocity * dt;
        let spin = UnitQuaternion::from_scaled_axis(state.angular_velocity * dt);
        state.orientation = UnitQuaternion::new_normalize((state.orientation * spin).into_inner());

        let buried = self
            .probe
            .count_collisions(state.belly_corners(self.profile));
        if buried >= self.physics.crash_corner_threshold.max(1) {
            self.crash_into(state, "Collision with terrain!", ledger, &mut report);
        }

        if report.message.is_some() {
            state.message = report.message.clone();
        }
        report
    }

    /// Ends the flight. Repeated calls on a crashed aircraft do nothing.
    pub fn handle_crash(
        &self,
        state: &mut AircraftState,
        reason: &str,
        ledger: &mut MilestoneLedger,
    ) -> Vec<FlightEvent> {
        if state.flags.is_crashed {
            return Vec::new();
        }

        state.flags.is_crashed = true;
        state.velocity.fill(0.0);
        state.angular_velocity.fill(0.0);
        state.thrust = 0.0;

        let kind = if self.probe.is_on_runway(&state.position) {
            CrashKind::RunwayCrashLanding
        } else {
            CrashKind::Terrain
        };
        state.crash = Some(CrashRecord {
            reason: reason.to_string(),
            kind,
        });
        state.message = Some(format!("CRASHED! {reason}"));
        warn!(
            "Crashed at ({:.1}, {:.1}, {:.1}): {}",
            state.position.x, state.position.y, state.position.z, reason
        );

        let mut report = StepReport::default();
        report.events.push(FlightEvent::Crashed {
            reason: reason.to_string(),
            kind,
        });
        let milestone = match kind {
            CrashKind::RunwayCrashLanding => Milestone::FirstCrashLanding,
            CrashKind::Terrain => Milestone::FirstCrash,
        };
        Self::award(milestone, ledger, &mut report);
        report.events
    }

    fn crash_into(
        &self,
        state: &mut AircraftState,
        reason: &str,
        ledger: &mut MilestoneLedger,
        report: &mut StepReport,
    ) {
        let events = self.handle_crash(state, reason, ledger);
        report.events.extend(events);
        report.message = state.message.clone();
    }

    fn award(milestone: Milestone, ledger: &mut MilestoneLedger, report: &mut StepReport) {
        if ledger.award(milestone) {
            report.events.push(FlightEvent::Milestone(milestone));
        }
    }
}
