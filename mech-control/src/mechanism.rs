//! Máquina de estados de um mecanismo
//!
//! Um [`Mechanism`] possui um [`BoundedMove`] e um [`ActiveHold`] sobre os
//! mesmos atuadores e faz a passagem de ativação entre eles de forma
//! explícita: nunca os dois ativos ao mesmo tempo.
//!
//! ```text
//!            move_to              chegada
//!   Idle ─────────────→ Moving ─────────────→ Idle
//!    │                    │  bloqueio no limite
//!    │ hold               └────────────────→ LimitBlocked
//!    ↓                                          │
//!   Holding ←──────────── hold ─────────────────┘
//!    │  (só sai por move_to / release)
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;
use mech_actuator::ActuatorGroup;
use mech_core::traits::MechComponent;
use crate::active_hold::{ActiveHold, HoldSnapshot, HoldStep};
use crate::bounded_move::{BoundedMove, MoveSnapshot, MoveStep};
use crate::config::{HoldConfig, MoveConfig};
use crate::error::{ensure_finite, ControlResult};

/// Estado conceitual do mecanismo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MechanismState {
    Idle,
    Moving,
    Holding,
    LimitBlocked,
}

/// O que aconteceu em um tick do mecanismo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MechanismStep {
    /// Nenhum controlador ativo
    Idle,
    Move(MoveStep),
    Hold(HoldStep),
}

/// Estado publicável (telemetria)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismSnapshot {
    pub name: String,
    pub state: MechanismState,
    pub movement: MoveSnapshot,
    pub hold: HoldSnapshot,
}

/// Mecanismo com movimento limitado e hold ativo
#[derive(Debug)]
pub struct Mechanism {
    name: String,
    state: MechanismState,
    mover: BoundedMove,
    holder: ActiveHold,
}

impl Mechanism {
    /// Cria mecanismo; o alvo inicial do hold é `hold_config.min_bound`
    pub fn new(
        name: &str,
        group: ActuatorGroup,
        move_config: MoveConfig,
        hold_config: HoldConfig,
    ) -> ControlResult<Self> {
        let mover = BoundedMove::named(&format!("{}/move", name), group.clone(), move_config)?;
        let holder = ActiveHold::named(
            &format!("{}/hold", name),
            group,
            hold_config,
            hold_config.min_bound,
        )?;
        Ok(Self {
            name: name.to_string(),
            state: MechanismState::Idle,
            mover,
            holder,
        })
    }

    /// Estado atual
    pub fn state(&self) -> MechanismState {
        self.state
    }

    /// Inicia movimento até `target`, tirando o hold de cena se preciso
    pub fn move_to(&mut self, target: f64) -> ControlResult<()> {
        let target = ensure_finite("target", target)?;
        self.holder.deactivate();
        if let Err(err) = self.mover.start_move(target) {
            self.transition(MechanismState::Idle);
            return Err(err);
        }
        self.transition(MechanismState::Moving);
        Ok(())
    }

    /// Passa a segurar `position` com correção ativa
    pub fn hold(&mut self, position: f64) -> ControlResult<()> {
        self.holder.set_target(position)?;
        self.mover.deactivate();
        if let Err(err) = self.holder.activate() {
            self.transition(MechanismState::Idle);
            return Err(err);
        }
        self.transition(MechanismState::Holding);
        Ok(())
    }

    /// Libera os dois controladores
    pub fn release(&mut self) {
        self.mover.deactivate();
        self.holder.deactivate();
        self.transition(MechanismState::Idle);
    }

    /// Um tick. `position` alimenta o movimento; o hold usa o agregador.
    pub fn tick(&mut self, position: f64) -> ControlResult<MechanismStep> {
        match self.state {
            MechanismState::Moving => {
                let step = self.mover.tick(position)?;
                match step {
                    MoveStep::Arrived => {
                        self.mover.deactivate();
                        self.transition(MechanismState::Idle);
                    }
                    MoveStep::Blocked { .. } => {
                        self.mover.deactivate();
                        self.transition(MechanismState::LimitBlocked);
                    }
                    MoveStep::Driving { .. } => {}
                }
                Ok(MechanismStep::Move(step))
            }
            MechanismState::Holding => Ok(MechanismStep::Hold(self.holder.tick()?)),
            MechanismState::Idle | MechanismState::LimitBlocked => Ok(MechanismStep::Idle),
        }
    }

    fn transition(&mut self, next: MechanismState) {
        if self.state != next {
            info!(mechanism = %self.name, from = ?self.state, to = ?next, "state change");
            self.state = next;
        }
    }

    /// Controlador de movimento
    pub fn mover(&self) -> &BoundedMove {
        &self.mover
    }

    /// Controlador de hold
    pub fn holder(&self) -> &ActiveHold {
        &self.holder
    }

    /// Acesso ao hold (freio passivo, alvo)
    pub fn holder_mut(&mut self) -> &mut ActiveHold {
        &mut self.holder
    }

    /// Estado para telemetria
    pub fn snapshot(&self) -> MechanismSnapshot {
        MechanismSnapshot {
            name: self.name.clone(),
            state: self.state,
            movement: self.mover.snapshot(),
            hold: self.holder.snapshot(),
        }
    }
}

impl MechComponent for Mechanism {
    fn name(&self) -> &str {
        &self.name
    }
}
