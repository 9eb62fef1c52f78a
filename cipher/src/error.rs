use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// 不合法分组大小
    InvalidBlockSize { target: usize, real: usize },

    /// 不合法的密钥长度
    InvalidKeySize { target: usize, real: usize },

    /// 输出缓冲区不足以容纳MAC
    BufferTooSmall { target: usize, real: usize },

    /// 参数缺失/非法, 或在未初始化时使用
    InvalidParameters(String),

    /// 注册表中不存在的算法
    UnsupportedAlgorithm(String),

    VerifyFailed,
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBlockSize { target, real } => f.write_fmt(format_args!(
                "Invalid block data size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidKeySize { target, real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` not match to target size `{target}`"
            )),
            Self::BufferTooSmall { target, real } => f.write_fmt(format_args!(
                "Output buffer size `{real}` is less than the mac size `{target}`"
            )),
            Self::InvalidParameters(s) => f.write_fmt(format_args!("Invalid parameters: {s}")),
            Self::UnsupportedAlgorithm(s) => {
                f.write_fmt(format_args!("Unsupported algorithm `{s}`"))
            }
            Self::VerifyFailed => f.write_str("MAC verify failed"),
        }
    }
}

impl Error for CipherError {}

impl From<CipherError> for std::io::Error {
    fn from(value: CipherError) -> Self {
        std::io::Error::other(value)
    }
}
