//! 算法1~8的流式MAC引擎 <br>
//!
//! - 流程:
//!   - init: 初始化CBC链, 按算法号派生子密钥(仅一次), 填充方式3时先输入长度分组;
//!   - update: 缓冲区溢出时执行初始变换, 之后的完整分组直接链加密, 最后一个分组(可能是完整的)始终留在缓冲区;
//!   - finalize: 填充, 最后迭代, 输出变换, 截断, 然后以相同参数重新开始;
//!
//! 缓冲区每次溢出都会执行初始变换. 对算法4/8而言, 只有整条消息一次`update`输入时结果才与标准的测试向量一致. <br>

use super::key_induce::{complement_nibble_swap, KeyInduce};
use super::params::{
    InitTransform, KeyInduction, LastIteration, MacVariant, OutputTransform, PaddingScheme,
    Parameters, TransformPlan, Truncation,
};
use crate::block_cipher::CipherProvider;
use crate::cipher_mode::{BlockPadding, CbcChain, DefaultPadding, ZeroPadding};
use crate::{CipherError, MAC};
use std::sync::Arc;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Accumulating,
}

pub struct Engine {
    chain: CbcChain,
    // 字节
    mac_size: usize,
    state: EngineState,
    plan: TransformPlan,
    padding: PaddingScheme,
    total_length_bits: u32,
    // 派生后实际使用的密钥
    key1: Vec<u8>,
    key2: Option<Vec<u8>>,
    k1: Vec<u8>,
    k2: Vec<u8>,
    iv: Vec<u8>,
    buf: Vec<u8>,
    // 下一个可以存放数据的索引
    buf_off: usize,
    // 累加值
    mac: Vec<u8>,
    // 本次计算中初始变换执行的次数
    init_fired: usize,
    // `Parameters`未指定时使用
    key_induction: KeyInduction,
}

impl Engine {
    /// MAC长度为一个分组
    pub fn new(provider: Arc<dyn CipherProvider>) -> Self {
        let n = provider.block_size();
        Self {
            chain: CbcChain::new(provider),
            mac_size: n,
            state: EngineState::Uninitialized,
            plan: TransformPlan::from(MacVariant::Alg1),
            padding: PaddingScheme::Pad1,
            total_length_bits: 0,
            key1: Vec::new(),
            key2: None,
            k1: Vec::new(),
            k2: Vec::new(),
            iv: vec![0u8; n],
            buf: vec![0u8; n],
            buf_off: 0,
            mac: vec![0u8; n],
            init_fired: 0,
            key_induction: KeyInduction::default(),
        }
    }

    /// `mac_bits`需是8的倍数且不超过分组位长度
    pub fn with_mac_size(
        provider: Arc<dyn CipherProvider>,
        mac_bits: usize,
    ) -> Result<Self, CipherError> {
        let n = provider.block_size();
        if mac_bits == 0 || mac_bits % 8 != 0 || mac_bits > n * 8 {
            return Err(CipherError::InvalidParameters(format!(
                "MAC size must be a positive multiple of 8 and no more than {} bits, got {mac_bits}",
                n * 8
            )));
        }

        let mut engine = Self::new(provider);
        engine.mac_size = mac_bits / 8;
        Ok(engine)
    }

    /// 算法2未给出key2且`Parameters`未指定派生方式时使用的派生方式
    pub fn with_key_induction(mut self, key_induction: KeyInduction) -> Self {
        self.key_induction = key_induction;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    fn check_init(&self) -> Result<(), CipherError> {
        if self.state == EngineState::Uninitialized {
            Err(CipherError::InvalidParameters(
                "MAC engine used before init".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn induce_keys(&mut self, params: &Parameters) -> Result<(), CipherError> {
        let n = self.block_size_x();
        self.key1 = params.key1().to_vec();
        self.key2 = params.key2().map(|k| k.to_vec());
        self.k1.clear();
        self.k2.clear();

        match params.variant() {
            MacVariant::Alg2 if self.key2.is_none() => match params
                .key_induction()
                .unwrap_or(self.key_induction)
            {
                KeyInduction::Legacy => {
                    self.key2 = Some(complement_nibble_swap(&self.key1));
                }
                // 主链仍使用key1, 只有K2参与输出变换
                KeyInduction::Current => {
                    let (_, k2) = KeyInduce::new(&mut self.chain).induce1(&self.key1)?;
                    self.key2 = Some(k2);
                }
            },
            MacVariant::Alg3 if self.key2.is_none() => {
                self.key2 = Some(self.key1.clone());
            }
            MacVariant::Alg4 => match self.key2.as_deref() {
                Some(key2) => self.k1 = complement_nibble_swap(key2),
                None => {
                    let (k1, k2) = KeyInduce::new(&mut self.chain).induce1(&self.key1)?;
                    self.key2 = Some(k1);
                    self.k1 = k2;
                }
            },
            MacVariant::Alg5 => {
                let (k1, k2) = KeyInduce::new(&mut self.chain).induce2(&self.key1)?;
                self.k1 = k1;
                self.k2 = k2;
            }
            MacVariant::Alg6 => match self.key2.as_deref() {
                Some(key2) => self.k2 = key2.to_vec(),
                None => {
                    let (k1, k2) = KeyInduce::new(&mut self.chain).induce1(&self.key1)?;
                    self.key1 = k1;
                    self.k2 = k2;
                }
            },
            _ => {}
        }

        log::debug!(
            "{}: variant {:?} keys ready, key1 {} bytes, key2 {:?} bytes, block {n} bytes",
            self.algorithm_name(),
            params.variant(),
            self.key1.len(),
            self.key2.as_ref().map(|k| k.len())
        );
        Ok(())
    }

    // 链加密缓冲区到累加值
    fn process_buf(&mut self) -> Result<(), CipherError> {
        self.chain.process_block(&self.buf, &mut self.mac)
    }

    fn restart(&mut self) -> Result<(), CipherError> {
        self.chain.init(true, &self.key1, Some(&self.iv))?;
        self.buf.fill(0);
        self.buf_off = 0;
        self.mac.fill(0);
        self.init_fired = 0;
        self.state = EngineState::Ready;

        if self.padding == PaddingScheme::Pad3 {
            let n = self.block_size_x();
            let mut block = vec![0u8; n];
            block[n - 4..].copy_from_slice(&self.total_length_bits.to_be_bytes());
            self.absorb(&block)?;
        }

        Ok(())
    }

    fn initial_transform(&mut self) -> Result<(), CipherError> {
        self.init_fired += 1;
        if self.init_fired > 1 && self.plan.init != InitTransform::Plain {
            log::warn!(
                "{}: initial transform {:?} applied again on buffer overflow, feed the whole message in one update to match the standard",
                self.algorithm_name(),
                self.plan.init
            );
        }

        self.process_buf()?;
        match self.plan.init {
            InitTransform::Plain => {}
            InitTransform::SubkeyDetour => {
                self.buf.fill(0);
                self.chain.reset();
                self.chain.init(true, &self.k1, None)?;
                self.chain.process_in_place(&mut self.mac)?;
                self.chain.init(true, &self.key1, Some(&self.mac))?;
            }
            InitTransform::MaskedRestart => {
                self.chain.reset();
                let mut mask = vec![0u8; self.block_size_x()];
                self.chain.process_in_place(&mut mask)?;
                self.buf.iter_mut().zip(mask.iter()).for_each(|(a, &b)| {
                    *a ^= b;
                });
                self.chain.reset();
                self.process_buf()?;
            }
        }

        Ok(())
    }

    fn absorb(&mut self, mut data: &[u8]) -> Result<(), CipherError> {
        let n = self.block_size_x();
        let gap = n - self.buf_off;

        if data.len() > gap {
            self.buf[self.buf_off..].copy_from_slice(&data[..gap]);
            self.initial_transform()?;
            self.buf_off = 0;
            data = &data[gap..];

            while data.len() > n {
                self.chain.process_block(&data[..n], &mut self.mac)?;
                data = &data[n..];
            }
        }

        self.buf[self.buf_off..(self.buf_off + data.len())].copy_from_slice(data);
        self.buf_off += data.len();
        Ok(())
    }

    fn pad(&mut self, msg_len: usize) -> Result<(), CipherError> {
        let n = self.block_size_x();
        let is_full = msg_len == n;

        match self.padding {
            PaddingScheme::Pad1 | PaddingScheme::Pad3 => {
                if !is_full {
                    ZeroPadding::new(n).pad_block(&mut self.buf, msg_len);
                }
            }
            PaddingScheme::Pad2 => {
                let off = if is_full {
                    self.process_buf()?;
                    0
                } else {
                    msg_len
                };
                DefaultPadding::new(n).pad_block(&mut self.buf, off);
            }
            PaddingScheme::Pad4 => {
                if !is_full {
                    DefaultPadding::new(n).pad_block(&mut self.buf, msg_len);
                }
            }
        }

        Ok(())
    }

    fn last_iteration(&mut self, is_complete: bool) -> Result<(), CipherError> {
        let n = self.block_size_x();
        match self.plan.last_iteration {
            LastIteration::Plain => self.process_buf()?,
            LastIteration::KeyedFinal => {
                xor_in_place(&mut self.mac, &self.buf);
                self.chain.reset();
                self.chain.init(true, &self.k2, Some(&vec![0u8; n]))?;
                self.chain.process_in_place(&mut self.mac)?;
            }
            LastIteration::SubkeyMask => {
                let k = if is_complete { &self.k1 } else { &self.k2 };
                xor_in_place(&mut self.buf, k);
                self.process_buf()?;
            }
            LastIteration::Rotate => {
                xor_in_place(&mut self.mac, &self.buf);
                if is_complete {
                    rotate_right1(&mut self.mac);
                } else {
                    rotate_left1(&mut self.mac);
                }
                self.chain.reset();
                self.chain.init(true, &self.key1, Some(&self.iv))?;
                self.chain.process_in_place(&mut self.mac)?;
            }
        }

        Ok(())
    }

    fn output_transform(&mut self) -> Result<(), CipherError> {
        let n = self.block_size_x();
        if self.plan.output == OutputTransform::Identity {
            return Ok(());
        }

        let key2 = self
            .key2
            .as_deref()
            .ok_or(CipherError::InvalidParameters(
                "the second key is required by the output transform".to_string(),
            ))?;

        match self.plan.output {
            OutputTransform::Identity => {}
            OutputTransform::Rekey => {
                self.chain.reset();
                self.chain.init(true, key2, Some(&vec![0u8; n]))?;
                self.chain.process_in_place(&mut self.mac)?;
            }
            OutputTransform::DecryptReencrypt => {
                self.chain.init(false, key2, Some(&self.iv))?;
                self.chain.process_in_place(&mut self.mac)?;
                self.chain.reset();
                self.chain.init(true, &self.key1, Some(&self.iv))?;
                self.chain.process_in_place(&mut self.mac)?;
            }
        }

        Ok(())
    }
}

fn xor_in_place(a: &mut [u8], b: &[u8]) {
    a.iter_mut().zip(b.iter()).for_each(|(a, &b)| {
        *a ^= b;
    });
}

fn rotate_left1(arr: &mut [u8]) {
    let msb = arr.first().map(|&x| x >> 7).unwrap_or_default();
    let mut carry = msb;
    arr.iter_mut().rev().for_each(|x| {
        let tmp = carry;
        carry = *x >> 7;
        *x = (*x << 1) | tmp;
    });
}

fn rotate_right1(arr: &mut [u8]) {
    let lsb = arr.last().map(|&x| x & 1).unwrap_or_default();
    let mut carry = lsb;
    arr.iter_mut().for_each(|x| {
        let tmp = carry;
        carry = *x & 1;
        *x = (*x >> 1) | (tmp << 7);
    });
}

impl MAC for Engine {
    fn algorithm_name(&self) -> String {
        format!("{}/GBMAC", self.chain.provider().name())
    }

    fn block_size_x(&self) -> usize {
        self.chain.block_size()
    }

    fn mac_size(&self) -> usize {
        self.mac_size
    }

    fn init(&mut self, params: &Parameters) -> Result<(), CipherError> {
        let n = self.block_size_x();
        if params.key1().is_empty() {
            return Err(CipherError::InvalidParameters(
                "the first key must not be empty".to_string(),
            ));
        }

        self.iv = match params.iv() {
            Some(iv) if iv.len() != n => {
                return Err(CipherError::InvalidParameters(format!(
                    "initialisation vector must be {n} bytes, got {}",
                    iv.len()
                )));
            }
            Some(iv) => iv.to_vec(),
            None => vec![0u8; n],
        };

        self.plan = *params.transform_plan();
        self.padding = params.padding();
        self.total_length_bits = params.total_length_bits();
        self.state = EngineState::Uninitialized;

        self.chain.init(true, params.key1(), Some(&self.iv))?;
        self.induce_keys(params)?;
        self.restart()?;

        log::trace!("{} init with {:?}", self.algorithm_name(), params);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CipherError> {
        self.check_init()?;
        if data.is_empty() {
            return Ok(());
        }

        self.absorb(data)?;
        self.state = EngineState::Accumulating;
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CipherError> {
        self.check_init()?;
        if out.len() < self.mac_size {
            return Err(CipherError::BufferTooSmall {
                target: self.mac_size,
                real: out.len(),
            });
        }

        let (n, msg_len) = (self.block_size_x(), self.buf_off);
        let is_complete = msg_len == n;

        self.pad(msg_len)?;
        self.last_iteration(is_complete)?;
        self.output_transform()?;

        let tag = match self.plan.truncation {
            Truncation::TrailingWhenPadded if !is_complete => &self.mac[(n - self.mac_size)..],
            _ => &self.mac[..self.mac_size],
        };
        out[..self.mac_size].copy_from_slice(tag);

        self.restart()?;
        Ok(self.mac_size)
    }

    fn reset(&mut self) -> Result<(), CipherError> {
        self.check_init()?;
        self.restart()
    }
}

impl_mac_write!(Engine);

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Engine {
    fn zeroize(&mut self) {
        self.chain.zeroize();
        self.key1.zeroize();
        self.key2.zeroize();
        self.k1.zeroize();
        self.k2.zeroize();
        self.buf.zeroize();
        self.mac.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for Engine {
    fn drop(&mut self) {
        self.zeroize();
    }
}
