//! 整段数据的填充, 以及一次性计算MAC的便捷入口. <br>
//!
//! 填充函数与`Engine::finalize`内部的填充一致, 但空消息在填充方式1下返回空, 而引擎会补一个全零分组. <br>

use super::{DualMac, Engine, MacVariant, PaddingScheme, Parameters};
use crate::block_cipher::CipherProvider;
use crate::cipher_mode::{BlockPadding, DefaultPadding, ZeroPadding};
use crate::{CipherError, MAC};
use std::sync::Arc;

pub fn padding(scheme: PaddingScheme, data: &[u8], block_size: usize) -> Vec<u8> {
    match scheme {
        PaddingScheme::Pad1 => padding1(data, block_size),
        PaddingScheme::Pad2 => padding2(data, block_size),
        PaddingScheme::Pad3 => padding3(data, block_size),
        PaddingScheme::Pad4 => padding4(data, block_size),
    }
}

/// 补0到分组长度的整数倍, 已对齐时不变
pub fn padding1(data: &[u8], block_size: usize) -> Vec<u8> {
    let mut buf = data.to_vec();
    ZeroPadding::new(block_size).padding(&mut buf);
    buf
}

/// 总是补`0x80`再补0
pub fn padding2(data: &[u8], block_size: usize) -> Vec<u8> {
    let mut buf = data.to_vec();
    DefaultPadding::new(block_size).padding(&mut buf);
    buf
}

/// 长度分组(消息位长度, 大端32位, 右对齐) + 填充方式1
pub fn padding3(data: &[u8], block_size: usize) -> Vec<u8> {
    let bits = (data.len() as u64).wrapping_mul(8) as u32;
    let mut buf = vec![0u8; block_size];
    buf[block_size - 4..].copy_from_slice(&bits.to_be_bytes());
    buf.extend(padding1(data, block_size));
    buf
}

/// 非空且已对齐时不填充, 否则同填充方式2
pub fn padding4(data: &[u8], block_size: usize) -> Vec<u8> {
    if !data.is_empty() && data.len() % block_size == 0 {
        data.to_vec()
    } else {
        padding2(data, block_size)
    }
}

pub fn compute_mac(
    provider: Arc<dyn CipherProvider>,
    params: &Parameters,
    mac_bits: usize,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let mut engine = Engine::with_mac_size(provider, mac_bits)?;
    engine.init(params)?;
    engine.update(data)?;
    engine.mac()
}

/// 2008版算法5/6
pub fn compute_mac_dual(
    provider: Arc<dyn CipherProvider>,
    params: &Parameters,
    mac_bits: usize,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let mut dual = DualMac::with_mac_size(provider, mac_bits)?;
    dual.init(params)?;
    dual.update(data)?;
    dual.mac()
}

/// 算法5 + 填充方式4, 输出一个分组. IV为零时即 SP 800-38B CMAC(OMAC1). <br>
pub fn cmac(
    provider: Arc<dyn CipherProvider>,
    key: &[u8],
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let bits = provider.block_size() * 8;
    let params = Parameters::new(MacVariant::Alg5, PaddingScheme::Pad4, key);
    let params = match iv {
        Some(iv) => params.with_iv(iv),
        None => params,
    };

    compute_mac(provider, &params, bits, data)
}

/// 算法1 + 填充方式1, `chain`作为IV输入, 并被输出的MAC覆盖; 为`None`时使用零IV. <br>
///
/// 除最后一段外, 每段的长度都是分组长度的整数倍时, 分段依次调用的结果与整段调用一致. <br>
pub fn cbc_mac_chained(
    provider: Arc<dyn CipherProvider>,
    key: &[u8],
    chain: Option<&mut [u8]>,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let bits = provider.block_size() * 8;
    let params = Parameters::new(MacVariant::Alg1, PaddingScheme::Pad1, key);

    match chain {
        Some(chain) => {
            let mac = compute_mac(provider, &params.with_iv(chain), bits, data)?;
            chain.copy_from_slice(&mac);
            Ok(mac)
        }
        None => compute_mac(provider, &params, bits, data),
    }
}
