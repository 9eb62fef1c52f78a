//! ## The Cipher Block Chaining Mode(CBC)
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//!
//! P_1 = Decrypt(C_1) \xor IV; P_j = Decrypt(C_j) \xor C_{j-1}, j = 2...n
//! $$
//!
//! `CbcChain`只做单个分组的链式变换, 不缓存数据也不填充. MAC计算过程中需要多次以不同的密钥/IV重新初始化,
//! 故初始化时未给出IV则沿用上一次的IV. <br>

use crate::block_cipher::{BlockCipherX, BlockDecryptX, BlockEncryptX, CipherProvider};
use crate::CipherError;
use std::sync::Arc;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

pub struct CbcChain {
    provider: Arc<dyn CipherProvider>,
    cipher: Option<Box<dyn BlockCipherX>>,
    /// 初始化向量
    iv: Vec<u8>,
    // C_{j-1}
    chain: Vec<u8>,
    is_encrypt: bool,
    // 避免每个分组分配
    tmp: Vec<u8>,
}

impl CbcChain {
    pub fn new(provider: Arc<dyn CipherProvider>) -> Self {
        let n = provider.block_size();
        Self {
            provider,
            cipher: None,
            iv: vec![0u8; n],
            chain: vec![0u8; n],
            is_encrypt: true,
            tmp: Vec::with_capacity(n),
        }
    }

    pub fn block_size(&self) -> usize {
        self.provider.block_size()
    }

    pub fn algorithm_name(&self) -> String {
        format!("{}/CBC", self.provider.name())
    }

    pub fn provider(&self) -> &Arc<dyn CipherProvider> {
        &self.provider
    }

    /// `iv`为`None`时沿用之前设置的IV(初次使用时为全零). <br>
    pub fn init(
        &mut self,
        is_encrypt: bool,
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<(), CipherError> {
        if let Some(iv) = iv {
            if iv.len() != self.block_size() {
                return Err(CipherError::InvalidParameters(format!(
                    "initialisation vector must be {} bytes, got {}",
                    self.block_size(),
                    iv.len()
                )));
            }
            self.iv.copy_from_slice(iv);
        }

        self.cipher = Some(self.provider.new_cipher(key)?);
        self.is_encrypt = is_encrypt;
        self.reset();
        Ok(())
    }

    /// 链值恢复为IV, 密钥不变
    pub fn reset(&mut self) {
        self.chain.copy_from_slice(&self.iv);
    }

    pub fn process_block(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let n = self.block_size();
        if input.len() != n || output.len() < n {
            return Err(CipherError::InvalidBlockSize {
                target: n,
                real: if input.len() != n {
                    input.len()
                } else {
                    output.len()
                },
            });
        }

        let cipher = self.cipher.as_ref().ok_or(CipherError::InvalidParameters(
            "chaining cipher used before init".to_string(),
        ))?;

        self.tmp.clear();
        if self.is_encrypt {
            self.chain.iter_mut().zip(input.iter()).for_each(|(a, &b)| {
                *a ^= b;
            });
            cipher.encrypt_block_x(&self.chain, &mut self.tmp)?;
            self.chain.copy_from_slice(&self.tmp);
            output[..n].copy_from_slice(&self.tmp);
        } else {
            cipher.decrypt_block_x(input, &mut self.tmp)?;
            self.tmp.iter_mut().zip(self.chain.iter()).for_each(|(a, &b)| {
                *a ^= b;
            });
            self.chain.copy_from_slice(input);
            output[..n].copy_from_slice(&self.tmp);
        }

        Ok(())
    }

    pub fn process_in_place(&mut self, block: &mut [u8]) -> Result<(), CipherError> {
        let input = block.to_vec();
        self.process_block(&input, block)
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for CbcChain {
    fn zeroize(&mut self) {
        self.cipher = None;
        self.iv.zeroize();
        self.chain.zeroize();
        self.tmp.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for CbcChain {
    fn drop(&mut self) {
        self.zeroize();
    }
}
