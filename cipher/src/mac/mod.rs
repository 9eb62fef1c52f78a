//! 基于分组密码的消息鉴别码 <br>
//!
//! GB/T 15852.1 信息技术 安全技术 消息鉴别码 第1部分: 采用分组密码的机制 <br>
//!
//! - `Engine`: 算法1~8的流式实现(2020版);
//! - `DualMac`: 2008版算法5/6的双引擎构造;
//! - `tool`: 整段数据的填充以及便捷入口;
//!

use crate::CipherError;

/// marker for Message Authentication Code <br>
///
/// 以某个密钥生成指定长度的消息摘要, 用于验证消息的完整性和身份验证(拥有该密钥的身份者才能够生成该摘要)
pub trait MAC {
    fn algorithm_name(&self) -> String;

    fn block_size_x(&self) -> usize;

    /// MAC字节长度
    fn mac_size(&self) -> usize;

    fn init(&mut self, params: &Parameters) -> Result<(), CipherError>;

    fn update(&mut self, data: &[u8]) -> Result<(), CipherError>;

    /// 写入`out[..mac_size]`, 之后以相同的参数重新开始
    fn finalize(&mut self, out: &mut [u8]) -> Result<usize, CipherError>;

    /// 丢弃已输入的数据, 保留密钥和派生的子密钥
    fn reset(&mut self) -> Result<(), CipherError>;

    fn mac(&mut self) -> Result<Vec<u8>, CipherError> {
        let mut out = vec![0u8; self.mac_size()];
        let n = self.finalize(&mut out)?;
        out.truncate(n);
        Ok(out)
    }

    fn verify(&mut self, tag: &[u8]) -> Result<(), CipherError> {
        let mac = self.mac()?;
        let diff = mac
            .iter()
            .zip(tag.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if diff == 0 && mac.len() == tag.len() {
            Ok(())
        } else {
            Err(CipherError::VerifyFailed)
        }
    }
}

macro_rules! impl_mac_write {
    ($NAME: ty) => {
        impl std::io::Write for $NAME {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                $crate::MAC::update(self, data)?;
                Ok(data.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
    };
}

mod params;
pub use params::{
    InitTransform, KeyInduction, LastIteration, MacVariant, OutputTransform, PaddingScheme,
    Parameters, TransformPlan, Truncation,
};

pub mod key_induce;
pub use key_induce::KeyInduce;

mod engine;
pub use engine::{Engine, EngineState};

mod dual;
pub use dual::DualMac;

pub mod tool;

#[cfg(test)]
mod tests;
