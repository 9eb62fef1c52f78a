//! 2008版算法5/6: 两个引擎以相关的密钥计算同一消息, 结果异或后截断. <br>
//!
//! - 算法5: 引擎A以算法1和key1, 引擎B以算法1和key1的取补;
//! - 算法6: 引擎A以算法4和(key1, key2), 引擎B以算法4和(key1, key2)的偶数字节取补;
//!
//! 与`Engine`在2020版下的算法5/6不是同一个构造, 两者不要求一致. <br>

use super::key_induce::{complement_alternating, complement_full};
use super::{Engine, MacVariant, Parameters};
use crate::block_cipher::CipherProvider;
use crate::{CipherError, MAC};
use std::sync::Arc;

pub struct DualMac {
    a: Engine,
    b: Engine,
    mac_size: usize,
    variant: Option<MacVariant>,
}

impl DualMac {
    pub fn new(provider: Arc<dyn CipherProvider>) -> Self {
        let mac_size = provider.block_size();
        Self {
            a: Engine::new(provider.clone()),
            b: Engine::new(provider),
            mac_size,
            variant: None,
        }
    }

    pub fn with_mac_size(
        provider: Arc<dyn CipherProvider>,
        mac_bits: usize,
    ) -> Result<Self, CipherError> {
        // 内部引擎总是输出完整分组, 这里只校验
        let mac_size = Engine::with_mac_size(provider.clone(), mac_bits)?.mac_size();
        let mut dual = Self::new(provider);
        dual.mac_size = mac_size;
        Ok(dual)
    }

    fn inner_params(params: &Parameters) -> Result<(Parameters, Parameters), CipherError> {
        let key1 = params.key1();
        let (pa, pb) = match params.variant() {
            MacVariant::Alg5 => (
                Parameters::new(MacVariant::Alg1, params.padding(), key1),
                Parameters::new(MacVariant::Alg1, params.padding(), &complement_full(key1)),
            ),
            MacVariant::Alg6 => {
                let key2 = params.key2().ok_or(CipherError::InvalidParameters(
                    "the dual MAC variant 6 requires the second key".to_string(),
                ))?;
                (
                    Parameters::new(MacVariant::Alg4, params.padding(), key1).with_key2(key2),
                    Parameters::new(
                        MacVariant::Alg4,
                        params.padding(),
                        &complement_alternating(key1),
                    )
                    .with_key2(&complement_alternating(key2)),
                )
            }
            v => {
                return Err(CipherError::InvalidParameters(format!(
                    "the dual MAC only supports variant 5 and 6, got {v:?}"
                )))
            }
        };

        let with_common = |p: Parameters| {
            let p = p.with_total_length_bits(params.total_length_bits());
            let p = match params.key_induction() {
                Some(k) => p.with_key_induction(k),
                None => p,
            };
            match params.iv() {
                Some(iv) => p.with_iv(iv),
                None => p,
            }
        };

        Ok((with_common(pa), with_common(pb)))
    }
}

impl MAC for DualMac {
    fn algorithm_name(&self) -> String {
        format!("{}/DUAL", self.a.algorithm_name())
    }

    fn block_size_x(&self) -> usize {
        self.a.block_size_x()
    }

    fn mac_size(&self) -> usize {
        self.mac_size
    }

    fn init(&mut self, params: &Parameters) -> Result<(), CipherError> {
        let (pa, pb) = Self::inner_params(params)?;
        self.a.init(&pa)?;
        self.b.init(&pb)?;
        self.variant = Some(params.variant());
        log::trace!("{} init with {:?}", self.algorithm_name(), params);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CipherError> {
        self.a.update(data)?;
        self.b.update(data)
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CipherError> {
        if self.variant.is_none() {
            return Err(CipherError::InvalidParameters(
                "dual MAC used before init".to_string(),
            ));
        }

        if out.len() < self.mac_size {
            return Err(CipherError::BufferTooSmall {
                target: self.mac_size,
                real: out.len(),
            });
        }

        let mut ma = self.a.mac()?;
        let mb = self.b.mac()?;
        ma.iter_mut().zip(mb.iter()).for_each(|(a, &b)| {
            *a ^= b;
        });

        out[..self.mac_size].copy_from_slice(&ma[..self.mac_size]);
        Ok(self.mac_size)
    }

    fn reset(&mut self) -> Result<(), CipherError> {
        self.a.reset()?;
        self.b.reset()
    }
}

impl_mac_write!(DualMac);
