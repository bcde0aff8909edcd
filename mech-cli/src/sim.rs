//! Planta sintética e laço de simulação

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mech_core::config::{BREAKAWAY_OFFSET, HOLD_MAX_SPEED};
use mech_actuator::{Actuator, ActuatorConfig, ActuatorGroup, SimulatedDriver};
use mech_control::{HoldConfig, Mechanism, MechanismSnapshot, MechanismState, MechanismStep, MoveConfig};

/// Configuração completa do simulador (arquivo `--config`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub name: String,
    pub movement: MoveConfig,
    pub hold: HoldConfig,
    pub actuators: Vec<ActuatorConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "lift".to_string(),
            movement: MoveConfig::default(),
            hold: HoldConfig::default(),
            actuators: vec![
                ActuatorConfig {
                    name: "lift-left".to_string(),
                    channel_id: 0,
                    inverted: false,
                },
                ActuatorConfig {
                    name: "lift-right".to_string(),
                    channel_id: 1,
                    inverted: true,
                },
            ],
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.actuators.is_empty() {
            bail!("at least one actuator is required");
        }
        self.movement.validate()?;
        self.hold.validate()?;
        Ok(())
    }
}

/// Defaults de sintonia em vigor (compilados ou vindos do ambiente)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TuningDefaults {
    pub hold_max_speed: f64,
    pub breakaway_offset: f64,
}

impl TuningDefaults {
    pub fn current() -> Self {
        Self {
            hold_max_speed: *HOLD_MAX_SPEED,
            breakaway_offset: *BREAKAWAY_OFFSET,
        }
    }
}

/// Saída de `mech config`
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub config: SimConfig,
    pub defaults: TuningDefaults,
}

impl EffectiveConfig {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            defaults: TuningDefaults::current(),
        }
    }
}

/// Posição integrada a partir do comando no espaço do mecanismo
#[derive(Debug, Clone, Copy)]
pub struct Plant {
    position: f64,
    gain: f64,
}

impl Plant {
    pub fn new(position: f64, gain: f64) -> Self {
        Self { position, gain }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    fn apply(&mut self, output: f64) {
        self.position += output * self.gain;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub final_position: f64,
    pub move_ticks: usize,
    pub hold_ticks: usize,
    pub hold_outputs: Vec<f64>,
    pub snapshot: MechanismSnapshot,
}

pub struct Simulation {
    mechanism: Mechanism,
    plant: Plant,
}

impl Simulation {
    pub fn new(config: &SimConfig, plant: Plant) -> Result<Self> {
        let actuators = config
            .actuators
            .iter()
            .map(|c| Actuator::with_config(SimulatedDriver::new(), c.clone()))
            .collect();
        let group = ActuatorGroup::new(actuators)?;
        let mechanism = Mechanism::new(&config.name, group, config.movement, config.hold)?;
        Ok(Self { mechanism, plant })
    }

    /// Move até `target` em no máximo `max_ticks`; depois segura por `hold_ticks`
    pub fn run(&mut self, target: f64, max_ticks: usize, hold_ticks: usize) -> Result<SimReport> {
        self.mechanism.move_to(target)?;

        let mut move_ticks = 0;
        while move_ticks < max_ticks && self.mechanism.state() == MechanismState::Moving {
            let step = self.mechanism.tick(self.plant.position())?;
            move_ticks += 1;
            if let MechanismStep::Move(step) = step {
                self.plant.apply(step.output());
                debug!(tick = move_ticks, position = self.plant.position(), "plant");
            }
        }

        if self.mechanism.state() == MechanismState::Moving {
            self.mechanism.release();
            bail!("move did not finish within {} ticks", max_ticks);
        }
        info!(
            position = self.plant.position(),
            ticks = move_ticks,
            state = ?self.mechanism.state(),
            "move finished"
        );

        let mut hold_outputs = Vec::with_capacity(hold_ticks);
        if hold_ticks > 0 {
            self.mechanism.hold(self.plant.position())?;
            for _ in 0..hold_ticks {
                if let MechanismStep::Hold(step) = self.mechanism.tick(self.plant.position())? {
                    hold_outputs.push(step.output().unwrap_or(0.0));
                }
            }
        }

        let snapshot = self.mechanism.snapshot();
        self.mechanism.release();

        Ok(SimReport {
            final_position: self.plant.position(),
            move_ticks,
            hold_ticks: hold_outputs.len(),
            hold_outputs,
            snapshot,
        })
    }
}
