//! 子密钥派生 <br>
//!
//! - 取补: 2008版的算法2/4以及双引擎构造的第二组密钥;
//! - 计数器链`induce1`: 2020版以CBC链加密计数器分组得到两个子密钥;
//! - 有限域倍乘`induce2`: 同CMAC的子密钥生成;
//!
//! 所有函数都返回新的密钥, 不修改调用者的数据. <br>

use crate::cipher_mode::CbcChain;
use crate::CipherError;

/// 每个字节取补
pub fn complement_full(key: &[u8]) -> Vec<u8> {
    key.iter().map(|&b| !b).collect()
}

/// 仅对偶数下标的字节取补
pub fn complement_alternating(key: &[u8]) -> Vec<u8> {
    key.iter()
        .enumerate()
        .map(|(i, &b)| if i % 2 == 0 { !b } else { b })
        .collect()
}

/// 高4位取补, 低4位不变
pub fn complement_nibble_swap(key: &[u8]) -> Vec<u8> {
    key.iter().map(|&b| (!b & 0xf0) ^ (b & 0x0f)).collect()
}

// 64位: x^64 + x^4 + x^3 + x + 1; 128位: x^128 + x^7 + x^2 + x + 1
const fn rb(n: usize) -> Option<u8> {
    match n {
        8 => Some(0x1b),
        16 => Some(0x87),
        _ => None,
    }
}

fn shl_arr(mut arr: Vec<u8>) -> Vec<u8> {
    let mut lsb = 0;
    arr.iter_mut().rev().for_each(|x| {
        let tmp = lsb;
        lsb = *x >> 7;
        *x <<= 1;
        *x |= tmp;
    });
    arr
}

/// GF(2^n)上乘以x
pub fn double_gf(block: &[u8]) -> Result<Vec<u8>, CipherError> {
    let rb = rb(block.len()).ok_or(CipherError::InvalidBlockSize {
        target: 16,
        real: block.len(),
    })?;

    let carry = block[0] & 0x80 != 0;
    let mut out = shl_arr(block.to_vec());
    if carry {
        if let Some(last) = out.last_mut() {
            *last ^= rb;
        }
    }

    Ok(out)
}

/// 借用MAC引擎的CBC链派生子密钥, 派生会重新初始化链的密钥和IV
pub struct KeyInduce<'a> {
    chain: &'a mut CbcChain,
}

impl<'a> KeyInduce<'a> {
    pub fn new(chain: &'a mut CbcChain) -> Self {
        Self { chain }
    }

    /// 以`key`和零IV初始化链, 依次链加密计数值`start+1..=end`的分组, 返回最后一个密文分组
    pub fn counter_chain(&mut self, key: &[u8], start: u32, end: u32) -> Result<Vec<u8>, CipherError> {
        if end <= start {
            return Err(CipherError::InvalidParameters(format!(
                "counter range ({start}, {end}] is empty"
            )));
        }

        let n = self.chain.block_size();
        let zero = vec![0u8; n];
        self.chain.init(true, key, Some(&zero))?;

        let mut block = vec![0u8; n];
        for c in (start + 1)..=end {
            block.fill(0);
            block[n - 4..].copy_from_slice(&c.to_be_bytes());
            self.chain.process_in_place(&mut block)?;
        }

        Ok(block)
    }

    /// (K1, K2), t = 密钥长度 / 分组长度
    pub fn induce1(&mut self, key: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        let n = self.chain.block_size();
        let t = u32::try_from(key.len() / n).unwrap_or(u32::MAX / 2);
        if t == 0 {
            return Err(CipherError::InvalidParameters(format!(
                "key length {} is shorter than the block size {n}",
                key.len()
            )));
        }

        let k1 = self.counter_chain(key, 0, t)?;
        let k2 = self.counter_chain(key, t, 2 * t)?;
        log::debug!("induce1: derived two {n}-byte subkeys with t = {t}");
        Ok((k1, k2))
    }

    /// L = E_K(0), K1 = L·x, K2 = K1·x
    pub fn induce2(&mut self, key: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        let n = self.chain.block_size();
        let zero = vec![0u8; n];
        self.chain.init(true, key, Some(&zero))?;

        let mut l = zero;
        self.chain.process_in_place(&mut l)?;
        let k1 = double_gf(&l)?;
        let k2 = double_gf(&k1)?;
        log::debug!("induce2: derived subkeys by doubling in GF(2^{})", n * 8);
        Ok((k1, k2))
    }
}
