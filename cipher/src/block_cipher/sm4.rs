//! SM4分组密码 <br>
//! GB/T 32907-2016 信息安全技术 SM4分组密码算法 <br>
//! 分组变换由RustCrypto `sm4`提供, 分组长度和密钥长度均为128位. <br>

use super::{BlockDecrypt, BlockEncrypt};
use crate::CipherError;
use ::sm4::cipher::{
    generic_array::GenericArray, BlockDecrypt as _, BlockEncrypt as _, KeyInit,
};

#[derive(Clone)]
pub struct SM4 {
    cipher: ::sm4::Sm4,
}

impl SM4 {
    pub const KEY_SIZE: usize = 16;
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        ::sm4::Sm4::new_from_slice(key)
            .map(|cipher| Self { cipher })
            .map_err(|_| CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            })
    }
}

impl BlockEncrypt<16> for SM4 {
    fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        let mut block = GenericArray::clone_from_slice(plaintext);
        self.cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(block.as_slice());
        out
    }
}

impl BlockDecrypt<16> for SM4 {
    fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
        let mut block = GenericArray::clone_from_slice(ciphertext);
        self.cipher.decrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(block.as_slice());
        out
    }
}

impl_block_cipher_x!(SM4, 16);
