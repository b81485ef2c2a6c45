//! Amostragem exponencial para a política ExpDist
//!
//! O escalonador só consome a interface `ExpSampler`; a fonte de entropia é do
//! kernel hospedeiro. `XorShiftExp` é a implementação padrão: xorshift64*
//! como fonte uniforme e transformada inversa `-ln(1 - u) / λ`.

use num_traits::Float;

/// Fonte de amostras de uma distribuição exponencial.
pub trait ExpSampler {
    /// Retorna uma amostra `r >= 0` com taxa `lambda` (média `1 / lambda`).
    fn sample_exponential(&mut self, lambda: f64) -> f64;
}

/// Semente usada quando o chamador passa 0 (xorshift trava em zero).
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Gerador xorshift64* com saída exponencial.
#[derive(Debug, Clone)]
pub struct XorShiftExp {
    state: u64,
}

impl XorShiftExp {
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Próximos 64 bits pseudo-aleatórios.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniforme em `[0, 1)` com 53 bits de mantissa.
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl Default for XorShiftExp {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}

impl ExpSampler for XorShiftExp {
    fn sample_exponential(&mut self, lambda: f64) -> f64 {
        // 1 - u fica em (0, 1], então ln nunca recebe zero
        let u = self.next_unit();
        -Float::ln(1.0 - u) / lambda
    }
}

/// Amostrador roteirizado para testes: devolve as amostras na ordem dada e
/// repete a última quando a lista acaba.
#[cfg(test)]
pub(crate) struct ScriptedSampler {
    samples: &'static [f64],
    next: usize,
}

#[cfg(test)]
impl ScriptedSampler {
    pub(crate) const fn new(samples: &'static [f64]) -> Self {
        Self { samples, next: 0 }
    }
}

#[cfg(test)]
impl ExpSampler for ScriptedSampler {
    fn sample_exponential(&mut self, _lambda: f64) -> f64 {
        let idx = self.next.min(self.samples.len() - 1);
        self.next += 1;
        self.samples[idx]
    }
}
