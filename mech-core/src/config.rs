//! Carregamento de defaults de sintonia a partir de `.env`
//!
//! Os valores compilados são os documentados; variáveis de ambiente (ou um
//! arquivo `.env` no diretório de trabalho) podem sobrescrevê-los.

use once_cell::sync::Lazy;
use std::env;

/// Velocidade máxima padrão do hold ativo
pub const DEFAULT_HOLD_MAX_SPEED: f64 = 0.3;

/// Offset fixo de atrito de arranque somado a toda correção do hold ativo
pub const DEFAULT_BREAKAWAY_OFFSET: f64 = 0.05;

// Carrega .env na primeira leitura de configuração
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_f64(key: &str) -> Option<f64> {
    ensure_loaded();
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Velocidade máxima do hold ativo.
/// Default: 0.3 (`MECH_HOLD_MAX_SPEED`)
pub fn default_hold_max_speed() -> f64 {
    env_f64("MECH_HOLD_MAX_SPEED").unwrap_or(DEFAULT_HOLD_MAX_SPEED)
}

/// Offset de atrito de arranque.
/// Default: 0.05 (`MECH_HOLD_BREAKAWAY_OFFSET`)
pub fn breakaway_offset() -> f64 {
    env_f64("MECH_HOLD_BREAKAWAY_OFFSET").unwrap_or(DEFAULT_BREAKAWAY_OFFSET)
}

/// Valores em cache
pub static HOLD_MAX_SPEED: Lazy<f64> = Lazy::new(default_hold_max_speed);
pub static BREAKAWAY_OFFSET: Lazy<f64> = Lazy::new(breakaway_offset);
