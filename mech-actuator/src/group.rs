//! Grupos de atuadores e capacidade de ativação
//!
//! Um [`ActuatorGroup`] é uma sequência ordenada de referências a atuadores.
//! Só um controlador por vez pode comandar um atuador: para isso ele
//! reivindica o grupo inteiro com [`ActuatorGroup::claim`] e recebe um
//! [`GroupLease`]. O lease é a única forma de emitir comandos de controle e
//! libera os atuadores ao ser descartado.

use tracing::{debug, warn};
use mech_core::traits::{MechComponent, NeutralMode};
use crate::aggregate;
use crate::error::{ActuatorError, ActuatorResult};
use crate::motor::Actuator;
use crate::types::ControllerId;

/// Sequência ordenada e não vazia de atuadores
#[derive(Debug, Clone)]
pub struct ActuatorGroup {
    actuators: Vec<Actuator>,
}

impl ActuatorGroup {
    /// Cria grupo; vazio é falha de configuração
    pub fn new(actuators: Vec<Actuator>) -> ActuatorResult<Self> {
        if actuators.is_empty() {
            return Err(ActuatorError::EmptyGroup);
        }
        Ok(Self { actuators })
    }

    /// Número de atuadores
    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    /// Sempre `false`: grupos vazios são rejeitados na construção
    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }

    /// Atuadores na ordem do grupo
    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    /// Itera na ordem do grupo
    pub fn iter(&self) -> std::slice::Iter<'_, Actuator> {
        self.actuators.iter()
    }

    /// Posição agregada: média das saídas
    pub fn average_output(&self) -> ActuatorResult<f64> {
        aggregate::average(&self.actuators)
    }

    /// Define o modo neutro de todos os atuadores, na ordem do grupo.
    ///
    /// Independe de quem detém a ativação: o freio passivo é um modo de
    /// hardware, não um comando de saída.
    pub fn set_neutral_mode_all(&self, mode: NeutralMode) -> ActuatorResult<()> {
        for actuator in &self.actuators {
            actuator.set_neutral_mode(mode)?;
        }
        debug!(mode = %mode, count = self.actuators.len(), "neutral mode applied");
        Ok(())
    }

    /// Algum atuador está reivindicado por outro controlador?
    pub fn claimed_by_other(&self, owner: ControllerId) -> ActuatorResult<Option<ControllerId>> {
        for actuator in &self.actuators {
            if let Some(current) = actuator.claimed_by()? {
                if current != owner {
                    return Ok(Some(current));
                }
            }
        }
        Ok(None)
    }

    /// Reivindica todos os atuadores para `owner`, ou nenhum.
    ///
    /// Em conflito, desfaz as reivindicações feitas nesta chamada e retorna
    /// [`ActuatorError::AlreadyClaimed`].
    pub fn claim(&self, owner: ControllerId) -> ActuatorResult<GroupLease> {
        let mut acquired: Vec<&Actuator> = Vec::with_capacity(self.actuators.len());

        for actuator in &self.actuators {
            match actuator.try_claim(owner) {
                Ok(Ok(true)) => acquired.push(actuator),
                Ok(Ok(false)) => {}
                Ok(Err(current)) => {
                    rollback(&acquired, owner);
                    warn!(
                        actuator = actuator.name(),
                        requested_by = %owner,
                        held_by = %current,
                        "activation conflict"
                    );
                    return Err(ActuatorError::AlreadyClaimed {
                        actuator: actuator.name().to_string(),
                        owner: current,
                    });
                }
                Err(err) => {
                    rollback(&acquired, owner);
                    return Err(err);
                }
            }
        }

        debug!(owner = %owner, count = self.actuators.len(), "group claimed");
        Ok(GroupLease {
            group: self.clone(),
            owner,
        })
    }
}

fn rollback(acquired: &[&Actuator], owner: ControllerId) {
    for actuator in acquired {
        if let Err(err) = actuator.release(owner) {
            warn!(actuator = actuator.name(), owner = %owner, error = %err, "rollback failed");
        }
    }
}

/// Capacidade de ativação sobre um grupo.
///
/// Enquanto existir, nenhum outro controlador consegue reivindicar estes
/// atuadores. Liberado no `Drop`.
#[derive(Debug)]
pub struct GroupLease {
    group: ActuatorGroup,
    owner: ControllerId,
}

impl GroupLease {
    /// Dono do lease
    pub fn owner(&self) -> ControllerId {
        self.owner
    }

    /// Grupo coberto
    pub fn group(&self) -> &ActuatorGroup {
        &self.group
    }

    /// Comanda `value` em todos os atuadores, na ordem do grupo.
    ///
    /// Para no primeiro erro de driver e o propaga.
    pub fn set_all(&self, value: f64) -> ActuatorResult<()> {
        for actuator in &self.group.actuators {
            actuator.set_output(value)?;
        }
        Ok(())
    }

    /// Posição agregada do grupo
    pub fn average_output(&self) -> ActuatorResult<f64> {
        self.group.average_output()
    }

    /// Libera explicitamente
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GroupLease {
    fn drop(&mut self) {
        for actuator in &self.group.actuators {
            if let Err(err) = actuator.release(self.owner) {
                warn!(actuator = actuator.name(), error = %err, "release failed");
            }
        }
        debug!(owner = %self.owner, "group released");
    }
}
