//! DES / TDEA <br>
//! [FIPS 46-3](https://csrc.nist.gov/files/pubs/fips/46-3/final/docs/fips46-3.pdf)<br>
//! [SP 800-67](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-67r2.pdf)<br>
//!
//! - `DES`: 8字节密钥;
//! - `TDES2`: 16字节密钥, K1-K2-K1;
//! - `TDES3`: 24字节密钥, K1-K2-K3;

use super::{BlockDecrypt, BlockEncrypt};
use crate::CipherError;
use ::des::cipher::{
    generic_array::GenericArray, BlockDecrypt as _, BlockEncrypt as _, KeyInit,
};

macro_rules! def_des {
    ($NAME: ident, $INNER: ty, $KEY_SIZE: literal) => {
        #[derive(Clone)]
        pub struct $NAME {
            cipher: $INNER,
        }

        impl $NAME {
            pub const KEY_SIZE: usize = $KEY_SIZE;
            pub const BLOCK_SIZE: usize = 8;

            pub fn new(key: &[u8]) -> Result<Self, CipherError> {
                <$INNER>::new_from_slice(key)
                    .map(|cipher| Self { cipher })
                    .map_err(|_| CipherError::InvalidKeySize {
                        target: $KEY_SIZE,
                        real: key.len(),
                    })
            }
        }

        impl BlockEncrypt<8> for $NAME {
            fn encrypt_block(&self, plaintext: &[u8; 8]) -> [u8; 8] {
                let mut block = GenericArray::clone_from_slice(plaintext);
                self.cipher.encrypt_block(&mut block);
                let mut out = [0u8; 8];
                out.copy_from_slice(block.as_slice());
                out
            }
        }

        impl BlockDecrypt<8> for $NAME {
            fn decrypt_block(&self, ciphertext: &[u8; 8]) -> [u8; 8] {
                let mut block = GenericArray::clone_from_slice(ciphertext);
                self.cipher.decrypt_block(&mut block);
                let mut out = [0u8; 8];
                out.copy_from_slice(block.as_slice());
                out
            }
        }

        impl_block_cipher_x!($NAME, 8);
    };
}

def_des!(DES, ::des::Des, 8);
def_des!(TDES2, ::des::TdesEde2, 16);
def_des!(TDES3, ::des::TdesEde3, 24);
