//! MAC的配置: 算法号(1~8), 填充方式(1~4), 密钥, IV, 消息总长度, 子密钥派生方式. <br>
//!
//! 算法号在构造时被解析为不可变的变换计划`TransformPlan`:
//!
//! | 算法 | 初始变换 | 最后迭代 | 输出变换 | 截断 |
//! |---|---|---|---|---|
//! | 1 | Plain | Plain | Identity | Leading |
//! | 2 | Plain | Plain | Rekey | Leading |
//! | 3 | Plain | Plain | DecryptReencrypt | Leading |
//! | 4 | SubkeyDetour | Plain | Rekey | Leading |
//! | 5 | Plain | SubkeyMask | Identity | Leading |
//! | 6 | Plain | KeyedFinal | Identity | Leading |
//! | 7 | Plain | Plain | Identity | TrailingWhenPadded |
//! | 8 | MaskedRestart | Rotate | Identity | Leading |

use std::fmt::Debug;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

impl_cipher_type!(
    MacVariant,
    u8,
    [Alg1 = 1],
    [Alg2],
    [Alg3],
    [Alg4],
    [Alg5],
    [Alg6],
    [Alg7],
    [Alg8]
);

impl_cipher_type!(PaddingScheme, u8, [Pad1 = 1], [Pad2], [Pad3], [Pad4]);

impl_cipher_type!(KeyInduction, u8, [Legacy = 1], [Current]);

impl Default for KeyInduction {
    fn default() -> Self {
        Self::Current
    }
}

/// 第一个分组溢出时对缓冲区的处理
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitTransform {
    Plain,
    /// 链加密后, 以K1加密一次, 再以结果作为新的IV
    SubkeyDetour,
    /// 以E(IV)作为掩码异或缓冲区后重新链加密
    MaskedRestart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LastIteration {
    Plain,
    /// 累加值异或最后分组, 以K2和零IV加密
    KeyedFinal,
    /// 完整分组异或K1, 否则异或K2
    SubkeyMask,
    /// 累加值异或最后分组, 完整时循环右移1位, 否则循环左移1位
    Rotate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputTransform {
    Identity,
    /// 以key2和零IV再加密一次
    Rekey,
    /// 以key2解密, 再以key1加密
    DecryptReencrypt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Truncation {
    Leading,
    /// 最后分组经过填充时取末尾字节
    TrailingWhenPadded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransformPlan {
    pub init: InitTransform,
    pub last_iteration: LastIteration,
    pub output: OutputTransform,
    pub truncation: Truncation,
}

impl From<MacVariant> for TransformPlan {
    fn from(variant: MacVariant) -> Self {
        let mut plan = Self {
            init: InitTransform::Plain,
            last_iteration: LastIteration::Plain,
            output: OutputTransform::Identity,
            truncation: Truncation::Leading,
        };

        match variant {
            MacVariant::Alg1 => {}
            MacVariant::Alg2 => plan.output = OutputTransform::Rekey,
            MacVariant::Alg3 => plan.output = OutputTransform::DecryptReencrypt,
            MacVariant::Alg4 => {
                plan.init = InitTransform::SubkeyDetour;
                plan.output = OutputTransform::Rekey;
            }
            MacVariant::Alg5 => plan.last_iteration = LastIteration::SubkeyMask,
            MacVariant::Alg6 => plan.last_iteration = LastIteration::KeyedFinal,
            MacVariant::Alg7 => plan.truncation = Truncation::TrailingWhenPadded,
            MacVariant::Alg8 => {
                plan.init = InitTransform::MaskedRestart;
                plan.last_iteration = LastIteration::Rotate;
            }
        }

        plan
    }
}

#[derive(Clone)]
pub struct Parameters {
    variant: MacVariant,
    padding: PaddingScheme,
    key1: Vec<u8>,
    key2: Option<Vec<u8>>,
    iv: Option<Vec<u8>>,
    total_length_bits: u32,
    key_induction: Option<KeyInduction>,
    plan: TransformPlan,
}

impl Parameters {
    pub fn new(variant: MacVariant, padding: PaddingScheme, key1: &[u8]) -> Self {
        Self {
            variant,
            padding,
            key1: key1.to_vec(),
            key2: None,
            iv: None,
            total_length_bits: 0,
            key_induction: None,
            plan: TransformPlan::from(variant),
        }
    }

    pub fn with_key2(mut self, key2: &[u8]) -> Self {
        self.key2 = Some(key2.to_vec());
        self
    }

    pub fn with_iv(mut self, iv: &[u8]) -> Self {
        self.iv = Some(iv.to_vec());
        self
    }

    /// 仅填充方式3使用, 作为首个分组参与计算
    pub fn with_total_length_bits(mut self, bits: u32) -> Self {
        self.total_length_bits = bits;
        self
    }

    /// 以消息字节长度设置位长度, 超过`u32`时保留低32位
    pub fn with_message_len(self, bytes: usize) -> Self {
        let bits = (bytes as u64).wrapping_mul(8) as u32;
        self.with_total_length_bits(bits)
    }

    pub fn with_key_induction(mut self, key_induction: KeyInduction) -> Self {
        self.key_induction = Some(key_induction);
        self
    }

    pub fn variant(&self) -> MacVariant {
        self.variant
    }

    pub fn padding(&self) -> PaddingScheme {
        self.padding
    }

    pub fn key1(&self) -> &[u8] {
        &self.key1
    }

    pub fn key2(&self) -> Option<&[u8]> {
        self.key2.as_deref()
    }

    pub fn iv(&self) -> Option<&[u8]> {
        self.iv.as_deref()
    }

    pub fn total_length_bits(&self) -> u32 {
        self.total_length_bits
    }

    /// 未设置时由MAC实现决定(`Engine`默认`Current`)
    pub fn key_induction(&self) -> Option<KeyInduction> {
        self.key_induction
    }

    pub fn transform_plan(&self) -> &TransformPlan {
        &self.plan
    }
}

// 不输出密钥
impl Debug for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameters")
            .field("variant", &self.variant)
            .field("padding", &self.padding)
            .field("key1_len", &self.key1.len())
            .field("key2_len", &self.key2.as_ref().map(|k| k.len()))
            .field("iv", &self.iv.is_some())
            .field("total_length_bits", &self.total_length_bits)
            .field("key_induction", &self.key_induction)
            .finish()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Parameters {
    fn zeroize(&mut self) {
        self.key1.zeroize();
        self.key2.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for Parameters {
    fn drop(&mut self) {
        self.zeroize();
    }
}
