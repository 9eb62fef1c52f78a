use crate::CipherError;

pub trait BlockEncrypt<const BLOCK_SIZE: usize> {
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockDecrypt<const BLOCK_SIZE: usize> {
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

/// 分组大小在运行时确定的分组加密 <br>
pub trait BlockEncryptX {
    fn block_size_x(&self) -> usize;

    // 写入ciphertext之前不清空
    fn encrypt_block_x(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>)
        -> Result<(), CipherError>;
}

pub trait BlockDecryptX {
    // 写入plaintext之前不清空
    fn decrypt_block_x(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>)
        -> Result<(), CipherError>;
}

pub trait BlockCipherX: BlockEncryptX + BlockDecryptX + Send + Sync {}

impl<T> BlockCipherX for T where T: BlockEncryptX + BlockDecryptX + Send + Sync {}

/// 分组密码的提供者, 由密钥构造具体的分组加密实例 <br>
///
/// 同一族算法按密钥长度选择具体实现, 派生出的子密钥可能比主密钥短(如AES256的派生子密钥为16字节). <br>
pub trait CipherProvider: Send + Sync {
    fn name(&self) -> &str;

    fn block_size(&self) -> usize;

    fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn BlockCipherX>, CipherError>;
}

macro_rules! impl_block_cipher_x {
    ($NAME: ident, $N: literal) => {
        impl $crate::BlockEncryptX for $NAME {
            fn block_size_x(&self) -> usize {
                $N
            }

            fn encrypt_block_x(
                &self,
                plaintext: &[u8],
                ciphertext: &mut Vec<u8>,
            ) -> Result<(), $crate::CipherError> {
                let block: &[u8; $N] =
                    plaintext
                        .try_into()
                        .map_err(|_| $crate::CipherError::InvalidBlockSize {
                            target: $N,
                            real: plaintext.len(),
                        })?;
                ciphertext.extend($crate::BlockEncrypt::<$N>::encrypt_block(self, block));
                Ok(())
            }
        }

        impl $crate::BlockDecryptX for $NAME {
            fn decrypt_block_x(
                &self,
                ciphertext: &[u8],
                plaintext: &mut Vec<u8>,
            ) -> Result<(), $crate::CipherError> {
                let block: &[u8; $N] =
                    ciphertext
                        .try_into()
                        .map_err(|_| $crate::CipherError::InvalidBlockSize {
                            target: $N,
                            real: ciphertext.len(),
                        })?;
                plaintext.extend($crate::BlockDecrypt::<$N>::decrypt_block(self, block));
                Ok(())
            }
        }
    };
}

mod aes;
pub use self::aes::{AES128, AES192, AES256};

mod des;
pub use self::des::{DES, TDES2, TDES3};

mod sm4;
pub use sm4::SM4;
