//! Scripted host.
//!
//! A deterministic [`Actor`] whose sensor readings come from configuration and
//! whose action calls are recorded, so runs can be inspected or compared.

use serde::{Deserialize, Serialize};

use robo_data::Value;

use crate::actor::{Actor, HostAction};

/// Sensor readings served by a [`ScriptedActor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorReadings {
    /// Fuel level at the start of a run
    pub fuel: Value,
    pub opponent_lr: Value,
    pub opponent_fb: Value,
    pub num_barrels: Value,
    /// Left/right offsets of the barrels, closest first
    pub barrels_lr: Vec<Value>,
    /// Front/back offsets of the barrels, closest first
    pub barrels_fb: Vec<Value>,
    pub wall_distance: Value,
    /// Fuel burned by each move (0 keeps the fuel reading static)
    pub fuel_per_move: Value,
    /// Whether `takeFuel` restores the starting fuel level
    pub refuel: bool,
}

impl Default for SensorReadings {
    fn default() -> Self {
        Self {
            fuel: 100,
            opponent_lr: 0,
            opponent_fb: 0,
            num_barrels: 0,
            barrels_lr: Vec::new(),
            barrels_fb: Vec::new(),
            wall_distance: 0,
            fuel_per_move: 0,
            refuel: false,
        }
    }
}

/// Actor that answers sensors from [`SensorReadings`] and records every action.
#[derive(Debug, Clone)]
pub struct ScriptedActor {
    readings: SensorReadings,
    fuel: Value,
    shield: bool,
    log: Vec<HostAction>,
}

impl ScriptedActor {
    pub fn new(readings: SensorReadings) -> Self {
        Self {
            fuel: readings.fuel,
            readings,
            shield: false,
            log: Vec::new(),
        }
    }

    /// Every action performed so far, in order.
    pub fn log(&self) -> &[HostAction] {
        &self.log
    }

    /// How many times `action` has been performed.
    pub fn count(&self, action: HostAction) -> usize {
        self.log.iter().filter(|a| **a == action).count()
    }

    pub fn shield_on(&self) -> bool {
        self.shield
    }

    pub fn readings(&self) -> &SensorReadings {
        &self.readings
    }

    fn barrel(offsets: &[Value], index: Value) -> Value {
        usize::try_from(index)
            .ok()
            .and_then(|i| offsets.get(i).copied())
            .unwrap_or(0)
    }
}

impl Default for ScriptedActor {
    fn default() -> Self {
        Self::new(SensorReadings::default())
    }
}

impl Actor for ScriptedActor {
    fn move_forward(&mut self) {
        self.log.push(HostAction::Move);
        self.fuel = self.fuel.saturating_sub(self.readings.fuel_per_move).max(0);
    }

    fn turn_left(&mut self) {
        self.log.push(HostAction::TurnLeft);
    }

    fn turn_right(&mut self) {
        self.log.push(HostAction::TurnRight);
    }

    fn turn_around(&mut self) {
        self.log.push(HostAction::TurnAround);
    }

    fn set_shield(&mut self, on: bool) {
        self.log.push(HostAction::Shield(on));
        self.shield = on;
    }

    fn take_fuel(&mut self) {
        self.log.push(HostAction::TakeFuel);
        if self.readings.refuel {
            self.fuel = self.readings.fuel;
        }
    }

    fn idle_wait(&mut self) {
        self.log.push(HostAction::IdleWait);
    }

    fn fuel(&self) -> Value {
        self.fuel
    }

    fn opponent_lr(&self) -> Value {
        self.readings.opponent_lr
    }

    fn opponent_fb(&self) -> Value {
        self.readings.opponent_fb
    }

    fn num_barrels(&self) -> Value {
        self.readings.num_barrels
    }

    fn barrel_lr(&self, index: Value) -> Value {
        Self::barrel(&self.readings.barrels_lr, index)
    }

    fn barrel_fb(&self, index: Value) -> Value {
        Self::barrel(&self.readings.barrels_fb, index)
    }

    fn wall_distance(&self) -> Value {
        self.readings.wall_distance
    }
}
