//! Agregador de posição
//!
//! Reduz as saídas de um grupo de atuadores a um único escalar (média
//! aritmética). É um proxy grosseiro de posição para mecanismos sem sensor
//! agregado.

use crate::error::{ActuatorError, ActuatorResult};
use crate::motor::Actuator;

/// Média aritmética de `output()` sobre todos os atuadores.
///
/// Um grupo vazio é falha de configuração e retorna
/// [`ActuatorError::EmptyGroup`], nunca um valor sentinela.
pub fn average(actuators: &[Actuator]) -> ActuatorResult<f64> {
    if actuators.is_empty() {
        return Err(ActuatorError::EmptyGroup);
    }

    let mut sum = 0.0;
    for actuator in actuators {
        sum += actuator.output()?;
    }
    Ok(sum / actuators.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SimulatedDriver;

    #[test]
    fn test_average_empty_is_error() {
        assert_eq!(average(&[]), Err(ActuatorError::EmptyGroup));
    }

    #[test]
    fn test_average_single() {
        let a = Actuator::new(SimulatedDriver::new(), false);
        a.set_output(0.3).unwrap();
        assert_eq!(average(&[a]).unwrap(), 0.3);
    }

    #[test]
    fn test_average_mixed() {
        let a = Actuator::new(SimulatedDriver::new(), false);
        let b = Actuator::new(SimulatedDriver::new(), false);
        let c = Actuator::new(SimulatedDriver::new(), false);
        a.set_output(0.2).unwrap();
        b.set_output(0.4).unwrap();
        c.set_output(0.9).unwrap();

        let avg = average(&[a, b, c]).unwrap();
        assert!((avg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_average_reads_wiring_space() {
        // Saída reportada pelo driver, sem desfazer a inversão
        let a = Actuator::new(SimulatedDriver::new(), false);
        let b = Actuator::new(SimulatedDriver::new(), true);
        a.set_output(0.5).unwrap();
        b.set_output(0.5).unwrap();

        assert_eq!(average(&[a, b]).unwrap(), 0.0);
    }
}
