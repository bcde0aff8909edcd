//! Atuador: um canal físico de saída com correção de direção
//!
//! Comandos chegam no espaço do mecanismo; o atuador aplica a inversão de
//! fiação antes de repassar ao driver. A flag `inverted` é fixa durante toda a
//! vida do atuador.

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};
use tracing::trace;
use mech_core::traits::{MechComponent, MotorDriver, NeutralMode};
use crate::error::ActuatorResult;
use crate::types::ControllerId;

/// Configuração do atuador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    /// Nome do atuador
    pub name: String,
    /// ID do canal (para hardware)
    pub channel_id: u8,
    /// Inverter direção?
    pub inverted: bool,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            name: "actuator".to_string(),
            channel_id: 0,
            inverted: false,
        }
    }
}

/// Canal compartilhado entre clones do mesmo atuador
#[derive(Debug)]
pub(crate) struct Channel {
    pub(crate) driver: Box<dyn MotorDriver>,
    pub(crate) claim: Option<ControllerId>,
}

/// Atuador concreto.
///
/// `Clone` produz outra referência ao **mesmo** canal físico: é assim que um
/// atuador aparece em mais de um grupo (ex.: movimento e hold do mesmo
/// mecanismo).
#[derive(Clone)]
pub struct Actuator {
    channel: Arc<Mutex<Channel>>,
    config: Arc<ActuatorConfig>,
}

impl std::fmt::Debug for Actuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actuator")
            .field("name", &self.config.name)
            .field("channel_id", &self.config.channel_id)
            .field("inverted", &self.config.inverted)
            .finish()
    }
}

impl Actuator {
    /// Cria atuador com nome padrão
    pub fn new<D: MotorDriver + 'static>(driver: D, inverted: bool) -> Self {
        Self::with_config(
            driver,
            ActuatorConfig {
                inverted,
                ..Default::default()
            },
        )
    }

    /// Cria com configuração específica
    pub fn with_config<D: MotorDriver + 'static>(driver: D, config: ActuatorConfig) -> Self {
        Self {
            channel: Arc::new(Mutex::new(Channel {
                driver: Box::new(driver),
                claim: None,
            })),
            config: Arc::new(config),
        }
    }

    /// Cria atuador com nome e ID de canal
    pub fn named<D: MotorDriver + 'static>(
        name: &str,
        channel_id: u8,
        driver: D,
        inverted: bool,
    ) -> Self {
        Self::with_config(
            driver,
            ActuatorConfig {
                name: name.to_string(),
                channel_id,
                inverted,
            },
        )
    }

    /// Fator de direção (`-1.0` se invertido)
    #[inline]
    fn sign(&self) -> f64 {
        if self.config.inverted { -1.0 } else { 1.0 }
    }

    /// Aplica uma saída normalizada no espaço do mecanismo.
    ///
    /// Não satura: valores fora de `[-1.0, 1.0]` são repassados ao driver.
    pub fn set_output(&self, value: f64) -> ActuatorResult<()> {
        let wired = value * self.sign();
        let mut channel = self.channel.lock()?;
        channel.driver.set_output(wired)?;
        trace!(actuator = %self.config.name, value, wired, "output");
        Ok(())
    }

    /// Última saída reportada pelo driver (espaço de fiação).
    ///
    /// Usada como proxy de posição pelo agregador; não é uma leitura de
    /// sensor.
    pub fn output(&self) -> ActuatorResult<f64> {
        let channel = self.channel.lock()?;
        Ok(channel.driver.output())
    }

    /// A direção deste atuador é invertida?
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.config.inverted
    }

    /// Troca o modo neutro do driver
    pub fn set_neutral_mode(&self, mode: NeutralMode) -> ActuatorResult<()> {
        let mut channel = self.channel.lock()?;
        channel.driver.set_neutral_mode(mode)?;
        Ok(())
    }

    /// Retorna configuração
    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    /// Controlador que detém este atuador, se houver
    pub fn claimed_by(&self) -> ActuatorResult<Option<ControllerId>> {
        let channel = self.channel.lock()?;
        Ok(channel.claim)
    }

    /// Os dois handles apontam para o mesmo canal físico?
    pub fn same_channel(&self, other: &Actuator) -> bool {
        Arc::ptr_eq(&self.channel, &other.channel)
    }

    /// Tenta reivindicar para `owner`; retorna o dono atual em caso de conflito
    pub(crate) fn try_claim(&self, owner: ControllerId) -> ActuatorResult<Result<bool, ControllerId>> {
        let mut channel = self.channel.lock()?;
        match channel.claim {
            None => {
                channel.claim = Some(owner);
                Ok(Ok(true))
            }
            Some(current) if current == owner => Ok(Ok(false)),
            Some(current) => Ok(Err(current)),
        }
    }

    /// Libera o atuador se `owner` for o dono
    pub(crate) fn release(&self, owner: ControllerId) -> ActuatorResult<()> {
        let mut channel = self.channel.lock()?;
        if channel.claim == Some(owner) {
            channel.claim = None;
        }
        Ok(())
    }
}

impl MechComponent for Actuator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_ready(&self) -> bool {
        self.channel.lock().is_ok()
    }
}
