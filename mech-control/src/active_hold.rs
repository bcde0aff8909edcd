//! Controlador de hold ativo (freio proporcional)
//!
//! Segura um mecanismo contra carga contínua (ex.: gravidade) aplicando uma
//! correção proporcional em vez de depender do freio passivo. A posição vem
//! do agregador (média das saídas do grupo). Nunca termina sozinho.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use mech_actuator::{ActuatorGroup, ControllerId, GroupLease};
use mech_core::traits::{Command, MechComponent, NeutralMode};
use crate::config::HoldConfig;
use crate::error::{ensure_finite, ControlError, ControlResult};

/// Decisão de um tick do hold ativo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoldStep {
    /// Dentro da banda morta: nenhum comando emitido neste tick
    Settled { position: f64 },
    /// Correção aplicada a todos os atuadores
    Correcting { position: f64, output: f64 },
}

impl HoldStep {
    /// Posição agregada lida neste tick
    pub fn position(&self) -> f64 {
        match self {
            HoldStep::Settled { position } | HoldStep::Correcting { position, .. } => *position,
        }
    }

    /// Saída comandada, se houve comando
    pub fn output(&self) -> Option<f64> {
        match self {
            HoldStep::Settled { .. } => None,
            HoldStep::Correcting { output, .. } => Some(*output),
        }
    }
}

// Vão zero (alvo sobre o limite) satura a fração em 1.0
fn fraction(position: f64, span: f64) -> f64 {
    if span == 0.0 {
        1.0
    } else {
        (position / span).abs()
    }
}

/// Lei de controle pura
pub fn hold_law(config: &HoldConfig, position: f64, target: f64) -> HoldStep {
    if (target - position).abs() <= config.threshold {
        return HoldStep::Settled { position };
    }

    let output = if position < target {
        let frac = fraction(position, config.min_bound - target);
        frac * config.max_speed + config.breakaway_offset
    } else {
        let frac = fraction(position, config.max_bound - target);
        -frac * config.max_speed + config.breakaway_offset
    };

    HoldStep::Correcting { position, output }
}

/// Estado publicável do controlador (telemetria)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldSnapshot {
    pub target: f64,
    pub active: bool,
    pub last_step: Option<HoldStep>,
}

/// Controlador de hold ativo
#[derive(Debug)]
pub struct ActiveHold {
    id: ControllerId,
    name: String,
    group: ActuatorGroup,
    config: HoldConfig,
    target: f64,
    // Mantido para o contrato do scheduler; a lei nunca o liga
    finished: bool,
    lease: Option<GroupLease>,
    last_step: Option<HoldStep>,
}

impl ActiveHold {
    /// Cria controlador segurando `target`
    pub fn new(group: ActuatorGroup, config: HoldConfig, target: f64) -> ControlResult<Self> {
        Self::named("active-hold", group, config, target)
    }

    /// Cria controlador com nome (para logs)
    pub fn named(
        name: &str,
        group: ActuatorGroup,
        config: HoldConfig,
        target: f64,
    ) -> ControlResult<Self> {
        config.validate()?;
        let target = ensure_finite("target", target)?;
        Ok(Self {
            id: ControllerId::next(),
            name: name.to_string(),
            group,
            config,
            target,
            finished: false,
            lease: None,
            last_step: None,
        })
    }

    /// Atualiza a posição segurada; vale a partir do próximo tick
    pub fn set_target(&mut self, position: f64) -> ControlResult<()> {
        self.target = ensure_finite("target", position)?;
        trace!(controller = %self.name, target = self.target, "hold target updated");
        Ok(())
    }

    /// Posição segurada
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Um tick da correção proporcional
    pub fn tick(&mut self) -> ControlResult<HoldStep> {
        let lease = self
            .lease
            .as_ref()
            .ok_or_else(|| ControlError::NotActive(self.name.clone()))?;

        let position = lease.average_output()?;
        let step = hold_law(&self.config, position, self.target);
        if let HoldStep::Correcting { output, .. } = step {
            lease.set_all(output)?;
            trace!(controller = %self.name, position, output, "correcting");
        }

        self.last_step = Some(step);
        Ok(step)
    }

    /// Adquire a ativação do grupo
    pub fn activate(&mut self) -> ControlResult<()> {
        if self.lease.is_none() {
            self.lease = Some(self.group.claim(self.id)?);
            self.finished = false;
            debug!(controller = %self.name, target = self.target, "hold activated");
        }
        Ok(())
    }

    /// Libera a ativação
    pub fn deactivate(&mut self) {
        if self.lease.take().is_some() {
            debug!(controller = %self.name, "hold deactivated");
        }
    }

    /// Detém a ativação?
    pub fn is_active(&self) -> bool {
        self.lease.is_some()
    }

    /// Liga o freio passivo de hardware em todos os atuadores
    pub fn enable_passive_brake(&self) -> ControlResult<()> {
        self.group.set_neutral_mode_all(NeutralMode::Brake)?;
        Ok(())
    }

    /// Coloca todos os atuadores em roda livre
    pub fn disable_passive_brake(&self) -> ControlResult<()> {
        self.group.set_neutral_mode_all(NeutralMode::Coast)?;
        Ok(())
    }

    /// Sempre `false`: o hold é um laço permanente
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Retorna configuração
    pub fn config(&self) -> &HoldConfig {
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
    pub fn last_step(&self) -> Option<HoldStep> {
        self.last_step
    }

    /// Estado para telemetria
    pub fn snapshot(&self) -> HoldSnapshot {
        HoldSnapshot {
            target: self.target,
            active: self.is_active(),
            last_step: self.last_step,
        }
    }

    /// Comando de scheduler que mantém o hold até ser interrompido
    pub fn hold_command(&mut self) -> HoldCommand<'_> {
        HoldCommand { controller: self }
    }
}

impl MechComponent for ActiveHold {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Adaptador [`Command`] para [`ActiveHold`]
pub struct HoldCommand<'a> {
    controller: &'a mut ActiveHold,
}

impl Command for HoldCommand<'_> {
    type Error = ControlError;

    fn initialize(&mut self) -> ControlResult<()> {
        self.controller.activate()
    }

    fn execute(&mut self) -> ControlResult<()> {
        self.controller.tick().map(|_| ())
    }

    fn is_finished(&self) -> bool {
        self.controller.is_finished()
    }

    fn end(&mut self, _interrupted: bool) -> ControlResult<()> {
        self.controller.deactivate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_actuator::{Actuator, SimulatedDriver};

    fn config() -> HoldConfig {
        HoldConfig::new(0.0, 10.0, 0.1)
            .with_max_speed(Some(0.3))
            .with_breakaway_offset(0.05)
    }

    #[test]
    fn test_law_below_target() {
        let step = hold_law(&config(), 2.0, 5.0);
        let output = step.output().unwrap();
        assert!((output - 0.17).abs() < 1e-12);
    }

    #[test]
    fn test_law_above_target() {
        // |8 / (10 - 5)| = 1.6
        let step = hold_law(&config(), 8.0, 5.0);
        let output = step.output().unwrap();
        assert!((output - (-1.6 * 0.3 + 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_law_within_threshold_is_noop() {
        assert_eq!(hold_law(&config(), 5.05, 5.0), HoldStep::Settled { position: 5.05 });
    }

    #[test]
    fn test_law_zero_span_saturates() {
        let step = hold_law(&config(), -1.0, 0.0);
        let output = step.output().unwrap();
        assert!(output.is_finite());
        assert!((output - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_law_symmetry() {
        let config = HoldConfig::new(-10.0, 10.0, 0.1)
            .with_max_speed(Some(0.3))
            .with_breakaway_offset(0.05);
        let up = hold_law(&config, -4.0, 0.0).output().unwrap() - 0.05;
        let down = hold_law(&config, 4.0, 0.0).output().unwrap() - 0.05;
        assert!((up + down).abs() < 1e-12);
        assert!(up > 0.0);
    }

    #[test]
    fn test_tick_requires_activation() {
        let group = ActuatorGroup::new(vec![Actuator::new(SimulatedDriver::new(), false)]).unwrap();
        let mut hold = ActiveHold::new(group, config(), 5.0).unwrap();
        assert!(matches!(hold.tick(), Err(ControlError::NotActive(_))));
    }

    #[test]
    fn test_settled_tick_issues_no_command() {
        let probe = SimulatedDriver::new();
        let group = ActuatorGroup::new(vec![Actuator::new(probe.clone(), false)]).unwrap();
        let mut hold = ActiveHold::new(group, config(), 0.0).unwrap();
        hold.activate().unwrap();

        let step = hold.tick().unwrap();
        assert_eq!(step, HoldStep::Settled { position: 0.0 });
        assert_eq!(probe.command_count(), 0);
        assert!(!hold.is_finished());
    }

    #[test]
    fn test_tick_above_target_drives_down() {
        let probe = SimulatedDriver::new();
        let actuator = Actuator::new(probe.clone(), false);
        actuator.set_output(8.0).unwrap();
        let group = ActuatorGroup::new(vec![actuator]).unwrap();
        let mut hold = ActiveHold::new(group, config(), 5.0).unwrap();
        hold.activate().unwrap();

        // |8 / (10 - 5)| * 0.3 = 0.48
        let step = hold.tick().unwrap();
        let output = step.output().unwrap();
        assert!((output - (-0.48 + 0.05)).abs() < 1e-12);
        assert_eq!(probe.last_command(), Some(output));
        assert_eq!(step.position(), 8.0);
    }

    #[test]
    fn test_tick_target_on_max_bound_saturates() {
        let probe = SimulatedDriver::new();
        let actuator = Actuator::new(probe.clone(), false);
        actuator.set_output(12.0).unwrap();
        let group = ActuatorGroup::new(vec![actuator]).unwrap();
        let mut hold = ActiveHold::new(group, config(), 10.0).unwrap();
        hold.activate().unwrap();

        let output = hold.tick().unwrap().output().unwrap();
        assert!(output.is_finite());
        assert!((output - (-0.3 + 0.05)).abs() < 1e-12);
        assert_eq!(probe.last_command(), Some(output));
    }

    #[test]
    fn test_set_target_rejects_nan() {
        let group = ActuatorGroup::new(vec![Actuator::new(SimulatedDriver::new(), false)]).unwrap();
        let mut hold = ActiveHold::new(group, config(), 5.0).unwrap();
        assert!(hold.set_target(f64::NAN).is_err());
        assert_eq!(hold.target(), 5.0);
    }

    #[test]
    fn test_passive_brake_toggle() {
        let probe = SimulatedDriver::new();
        let group = ActuatorGroup::new(vec![Actuator::new(probe.clone(), false)]).unwrap();
        let hold = ActiveHold::new(group, config(), 5.0).unwrap();

        hold.disable_passive_brake().unwrap();
        assert_eq!(probe.neutral_mode(), NeutralMode::Coast);
        hold.enable_passive_brake().unwrap();
        assert_eq!(probe.neutral_mode(), NeutralMode::Brake);
    }
}
