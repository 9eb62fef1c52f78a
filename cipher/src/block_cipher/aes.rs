//! AES加密<br>
//! FIPS 197  <br>
//! [FIPS 197-upd1](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf)<br>
//! 分组变换由RustCrypto `aes`提供, 密钥编排在drop时清零. <br>

use super::{BlockDecrypt, BlockEncrypt};
use crate::CipherError;
use ::aes::cipher::{
    generic_array::GenericArray, BlockDecrypt as _, BlockEncrypt as _, KeyInit,
};

macro_rules! def_aes {
    ($NAME: ident, $INNER: ty, $KEY_SIZE: literal) => {
        #[derive(Clone)]
        pub struct $NAME {
            cipher: $INNER,
        }

        impl $NAME {
            pub const KEY_SIZE: usize = $KEY_SIZE;
            pub const BLOCK_SIZE: usize = 16;

            pub fn new(key: &[u8]) -> Result<Self, CipherError> {
                <$INNER>::new_from_slice(key)
                    .map(|cipher| Self { cipher })
                    .map_err(|_| CipherError::InvalidKeySize {
                        target: $KEY_SIZE,
                        real: key.len(),
                    })
            }
        }

        impl BlockEncrypt<16> for $NAME {
            fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
                let mut block = GenericArray::clone_from_slice(plaintext);
                self.cipher.encrypt_block(&mut block);
                let mut out = [0u8; 16];
                out.copy_from_slice(block.as_slice());
                out
            }
        }

        impl BlockDecrypt<16> for $NAME {
            fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
                let mut block = GenericArray::clone_from_slice(ciphertext);
                self.cipher.decrypt_block(&mut block);
                let mut out = [0u8; 16];
                out.copy_from_slice(block.as_slice());
                out
            }
        }

        impl_block_cipher_x!($NAME, 16);
    };
}

def_aes!(AES128, ::aes::Aes128, 16);
def_aes!(AES192, ::aes::Aes192, 24);
def_aes!(AES256, ::aes::Aes256, 32);
