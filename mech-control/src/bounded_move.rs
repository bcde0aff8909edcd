//! Controlador de movimento limitado (bang-bang com limites)
//!
//! Leva um grupo de atuadores até um alvo usando uma posição fornecida pelo
//! chamador a cada tick. Termina ao entrar na banda de tolerância ou ao ficar
//! bloqueado em um limite.
//!
//! Uso típico:
//!
//! ```no_run
//! # use mech_control::{BoundedMove, MoveConfig};
//! # use mech_actuator::{Actuator, ActuatorGroup, SimulatedDriver};
//! # fn read_encoder() -> f64 { 0.0 }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let group = ActuatorGroup::new(vec![Actuator::new(SimulatedDriver::new(), false)])?;
//! let mut lift = BoundedMove::new(group, MoveConfig::new(0.0, 10.0, 0.4, 0.05, 0.5))?;
//! lift.start_move(7.5)?;
//!
//! while !lift.is_finished() {
//!     lift.tick(read_encoder())?;
//! }
//! lift.deactivate();
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use mech_actuator::{ActuatorGroup, ControllerId, GroupLease};
use mech_core::traits::{Command, MechComponent};
use crate::config::MoveConfig;
use crate::error::{ensure_finite, ControlError, ControlResult};

/// Decisão de um tick do controlador de movimento
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveStep {
    /// Dentro da tolerância: saída zero, movimento terminado
    Arrived,
    /// Preso em um limite pedindo para ir além: `hold_speed`, terminado
    Blocked { output: f64 },
    /// Ainda em deslocamento
    Driving { output: f64 },
}

impl MoveStep {
    /// Saída comandada neste tick
    pub fn output(&self) -> f64 {
        match self {
            MoveStep::Arrived => 0.0,
            MoveStep::Blocked { output } | MoveStep::Driving { output } => *output,
        }
    }

    /// Este passo encerra o movimento?
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveStep::Driving { .. })
    }
}

/// Lei de controle pura.
///
/// A regra de chegada tem precedência sobre os limites: um alvo exatamente
/// num limite termina pela tolerância.
pub fn move_law(config: &MoveConfig, current: f64, target: f64) -> MoveStep {
    if (current - target).abs() <= config.threshold {
        return MoveStep::Arrived;
    }

    let need_up = current < target;
    let need_down = current > target;

    if current >= config.max_bound {
        return if need_down {
            MoveStep::Driving { output: -config.motor_speed }
        } else {
            MoveStep::Blocked { output: config.hold_speed }
        };
    }

    if current <= config.min_bound {
        return if need_up {
            MoveStep::Driving { output: config.motor_speed }
        } else {
            MoveStep::Blocked { output: config.hold_speed }
        };
    }

    if need_down {
        MoveStep::Driving { output: -config.motor_speed }
    } else {
        MoveStep::Driving { output: config.motor_speed }
    }
}

/// Estado publicável do controlador (telemetria)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveSnapshot {
    pub target: f64,
    pub finished: bool,
    pub active: bool,
    pub last_step: Option<MoveStep>,
}

/// Controlador de movimento limitado
#[derive(Debug)]
pub struct BoundedMove {
    id: ControllerId,
    name: String,
    group: ActuatorGroup,
    config: MoveConfig,
    target: f64,
    finished: bool,
    lease: Option<GroupLease>,
    last_step: Option<MoveStep>,
}

impl BoundedMove {
    /// Cria controlador; o alvo inicial é `min_bound`
    pub fn new(group: ActuatorGroup, config: MoveConfig) -> ControlResult<Self> {
        Self::named("bounded-move", group, config)
    }

    /// Cria controlador com nome (para logs)
    pub fn named(name: &str, group: ActuatorGroup, config: MoveConfig) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self {
            id: ControllerId::next(),
            name: name.to_string(),
            group,
            target: config.min_bound,
            config,
            finished: false,
            lease: None,
            last_step: None,
        })
    }

    /// Inicia um novo movimento.
    ///
    /// Adquire a ativação do grupo (se ainda não a tiver), define o alvo e
    /// limpa `finished`. Não comanda o hardware.
    pub fn start_move(&mut self, target: f64) -> ControlResult<()> {
        let target = ensure_finite("target", target)?;
        self.activate()?;
        self.target = target;
        self.finished = false;
        self.last_step = None;
        debug!(controller = %self.name, target, "move started");
        Ok(())
    }

    /// Um tick da lei de controle com a posição atual
    pub fn tick(&mut self, current: f64) -> ControlResult<MoveStep> {
        let current = ensure_finite("position reading", current)?;
        let lease = self
            .lease
            .as_ref()
            .ok_or_else(|| ControlError::NotActive(self.name.clone()))?;

        let step = move_law(&self.config, current, self.target);
        lease.set_all(step.output())?;
        self.last_step = Some(step);

        match step {
            MoveStep::Arrived => {
                if !self.finished {
                    debug!(controller = %self.name, current, target = self.target, "arrived");
                }
                self.finished = true;
            }
            MoveStep::Blocked { output } => {
                if !self.finished {
                    warn!(
                        controller = %self.name,
                        current,
                        target = self.target,
                        output,
                        "blocked at limit"
                    );
                }
                self.finished = true;
            }
            MoveStep::Driving { output } => {
                trace!(controller = %self.name, current, output, "driving");
            }
        }

        Ok(step)
    }

    /// Comanda `hold_speed` em todos os atuadores; não altera `finished`
    pub fn stop(&self) -> ControlResult<()> {
        let lease = self
            .lease
            .as_ref()
            .ok_or_else(|| ControlError::NotActive(self.name.clone()))?;
        lease.set_all(self.config.hold_speed)?;
        Ok(())
    }

    /// Adquire a ativação do grupo
    pub fn activate(&mut self) -> ControlResult<()> {
        if self.lease.is_none() {
            self.lease = Some(self.group.claim(self.id)?);
        }
        Ok(())
    }

    /// Libera a ativação; as saídas atuais permanecem no hardware
    pub fn deactivate(&mut self) {
        if self.lease.take().is_some() {
            debug!(controller = %self.name, "move deactivated");
        }
    }

    /// Detém a ativação?
    pub fn is_active(&self) -> bool {
        self.lease.is_some()
    }

    /// Flag de término (fixa até o próximo `start_move`)
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Alvo atual
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retorna configuração
    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    /// Grupo controlado
    pub fn group(&self) -> &ActuatorGroup {
        &self.group
    }

    /// Identidade de ativação
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Decisão do último tick
    pub fn last_step(&self) -> Option<MoveStep> {
        self.last_step
    }

    /// Estado para telemetria
    pub fn snapshot(&self) -> MoveSnapshot {
        MoveSnapshot {
            target: self.target,
            finished: self.finished,
            active: self.is_active(),
            last_step: self.last_step,
        }
    }

    /// Comando de scheduler para mover até `target` lendo `position` a cada tick
    pub fn move_command<F>(&mut self, target: f64, position: F) -> MoveCommand<'_, F>
    where
        F: FnMut() -> f64,
    {
        MoveCommand {
            controller: self,
            target,
            position,
        }
    }
}

impl MechComponent for BoundedMove {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Adaptador [`Command`] para [`BoundedMove`]
pub struct MoveCommand<'a, F> {
    controller: &'a mut BoundedMove,
    target: f64,
    position: F,
}

impl<F: FnMut() -> f64> Command for MoveCommand<'_, F> {
    type Error = ControlError;

    fn initialize(&mut self) -> ControlResult<()> {
        self.controller.start_move(self.target)
    }

    fn execute(&mut self) -> ControlResult<()> {
        let current = (self.position)();
        self.controller.tick(current).map(|_| ())
    }

    fn is_finished(&self) -> bool {
        self.controller.is_finished()
    }

    fn end(&mut self, interrupted: bool) -> ControlResult<()> {
        let result = if interrupted && self.controller.is_active() {
            self.controller.stop()
        } else {
            Ok(())
        };
        self.controller.deactivate();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_actuator::{Actuator, SimulatedDriver};

    fn config() -> MoveConfig {
        MoveConfig::new(0.0, 10.0, 0.4, 0.05, 0.5)
    }

    fn controller() -> (SimulatedDriver, BoundedMove) {
        let probe = SimulatedDriver::new();
        let group = ActuatorGroup::new(vec![Actuator::new(probe.clone(), false)]).unwrap();
        (probe, BoundedMove::new(group, config()).unwrap())
    }

    #[test]
    fn test_law_arrival() {
        assert_eq!(move_law(&config(), 5.2, 5.0), MoveStep::Arrived);
        assert_eq!(move_law(&config(), 4.5, 5.0), MoveStep::Arrived);
    }

    #[test]
    fn test_law_normal_range() {
        assert_eq!(move_law(&config(), 9.8, 5.0), MoveStep::Driving { output: -0.4 });
        assert_eq!(move_law(&config(), 1.0, 5.0), MoveStep::Driving { output: 0.4 });
    }

    #[test]
    fn test_law_at_max_bound() {
        assert_eq!(move_law(&config(), 10.0, 3.0), MoveStep::Driving { output: -0.4 });
        assert_eq!(move_law(&config(), 10.5, 12.0), MoveStep::Blocked { output: 0.05 });
    }

    #[test]
    fn test_law_at_min_bound() {
        assert_eq!(move_law(&config(), 0.0, 3.0), MoveStep::Driving { output: 0.4 });
        assert_eq!(move_law(&config(), -0.5, -3.0), MoveStep::Blocked { output: 0.05 });
    }

    #[test]
    fn test_law_target_on_bound_arrives() {
        assert_eq!(move_law(&config(), 10.0, 10.0), MoveStep::Arrived);
        assert_eq!(move_law(&config(), 0.0, 0.0), MoveStep::Arrived);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let group = ActuatorGroup::new(vec![Actuator::new(SimulatedDriver::new(), false)]).unwrap();
        let bad = MoveConfig::new(1.0, 0.0, 0.4, 0.0, 0.1);
        assert!(matches!(
            BoundedMove::new(group, bad),
            Err(ControlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_initial_target_is_min_bound() {
        let (_, mover) = controller();
        assert_eq!(mover.target(), 0.0);
        assert!(!mover.is_finished());
        assert!(!mover.is_active());
    }

    #[test]
    fn test_start_move_has_no_hardware_effect() {
        let (probe, mut mover) = controller();
        mover.start_move(5.0).unwrap();

        assert_eq!(probe.command_count(), 0);
        assert_eq!(mover.target(), 5.0);
        assert!(mover.is_active());
    }

    #[test]
    fn test_tick_requires_activation() {
        let (_, mut mover) = controller();
        assert!(matches!(mover.tick(3.0), Err(ControlError::NotActive(_))));
        assert!(matches!(mover.stop(), Err(ControlError::NotActive(_))));
    }

    #[test]
    fn test_tick_rejects_nan_reading() {
        let (_, mut mover) = controller();
        mover.start_move(5.0).unwrap();
        assert!(matches!(mover.tick(f64::NAN), Err(ControlError::InvalidInput(_))));
    }

    #[test]
    fn test_finished_resets_on_new_move() {
        let (_, mut mover) = controller();
        mover.start_move(5.0).unwrap();
        mover.tick(5.1).unwrap();
        assert!(mover.is_finished());

        mover.start_move(8.0).unwrap();
        assert!(!mover.is_finished());
    }

    #[test]
    fn test_stop_keeps_finished() {
        let (probe, mut mover) = controller();
        mover.start_move(5.0).unwrap();
        mover.tick(2.0).unwrap();
        mover.stop().unwrap();

        assert!(!mover.is_finished());
        assert_eq!(probe.last_command(), Some(0.05));
    }

    #[test]
    fn test_snapshot_serializes() {
        let (_, mut mover) = controller();
        mover.start_move(5.0).unwrap();
        mover.tick(9.0).unwrap();

        let json = serde_json::to_string(&mover.snapshot()).unwrap();
        assert!(json.contains("\"target\":5.0"));
        assert!(json.contains("Driving"));
    }
}
