//! actor.rs -- the capability interface a host exposes to scripts.
//!
//! The interpreter never touches arena state directly. Every action and sensor
//! in a script becomes exactly one call on an [`Actor`].

use std::fmt;

use robo_data::Value;

/// Actions and sensors of the simulated actor a script controls.
///
/// Calls are synchronous. Faults inside a host are not caught by the
/// interpreter.
pub trait Actor {
    fn move_forward(&mut self);
    fn turn_left(&mut self);
    fn turn_right(&mut self);
    fn turn_around(&mut self);
    fn set_shield(&mut self, on: bool);
    fn take_fuel(&mut self);
    fn idle_wait(&mut self);

    fn fuel(&self) -> Value;
    fn opponent_lr(&self) -> Value;
    fn opponent_fb(&self) -> Value;
    fn num_barrels(&self) -> Value;
    fn barrel_lr(&self, index: Value) -> Value;
    fn barrel_fb(&self, index: Value) -> Value;
    fn wall_distance(&self) -> Value;
}

/// A single call into the host's action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAction {
    Move,
    TurnLeft,
    TurnRight,
    TurnAround,
    Shield(bool),
    TakeFuel,
    IdleWait,
}

impl HostAction {
    /// Forward this action to `actor`.
    pub fn apply<A: Actor + ?Sized>(self, actor: &mut A) {
        match self {
            HostAction::Move => actor.move_forward(),
            HostAction::TurnLeft => actor.turn_left(),
            HostAction::TurnRight => actor.turn_right(),
            HostAction::TurnAround => actor.turn_around(),
            HostAction::Shield(on) => actor.set_shield(on),
            HostAction::TakeFuel => actor.take_fuel(),
            HostAction::IdleWait => actor.idle_wait(),
        }
    }
}

impl fmt::Display for HostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAction::Move => write!(f, "move"),
            HostAction::TurnLeft => write!(f, "turnLeft"),
            HostAction::TurnRight => write!(f, "turnRight"),
            HostAction::TurnAround => write!(f, "turnAround"),
            HostAction::Shield(true) => write!(f, "setShield(on)"),
            HostAction::Shield(false) => write!(f, "setShield(off)"),
            HostAction::TakeFuel => write!(f, "takeFuel"),
            HostAction::IdleWait => write!(f, "idleWait"),
        }
    }
}
