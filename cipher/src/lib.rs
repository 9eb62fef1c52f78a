mod error;
pub use error::CipherError;

pub use rand::{DefaultRand, Rand};

macro_rules! impl_cipher_type {
    ($NAME: ident, $REPR: ty, $([$ITEM: ident $(=$VAL: literal)?]),+) => {
        #[repr($REPR)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum $NAME {
            $($ITEM $(=$VAL)?,)+
        }

        impl $NAME {
            pub const ALL: &'static [$NAME] = &[$(Self::$ITEM),+];
        }

        impl TryFrom<$REPR> for $NAME {
            type Error = $crate::CipherError;

            fn try_from(value: $REPR) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == Self::$ITEM as $REPR => Ok(Self::$ITEM),)+
                    _ => Err($crate::CipherError::InvalidParameters(format!(
                        "{} is no valid {} value",
                        value,
                        stringify!($NAME)
                    ))),
                }
            }
        }
    };
}

pub mod block_cipher;
pub use block_cipher::{
    BlockCipherX, BlockDecrypt, BlockDecryptX, BlockEncrypt, BlockEncryptX,
    CipherProvider,
};

pub mod cipher_mode;
pub use cipher_mode::BlockPadding;

pub mod mac;
pub use mac::MAC;

pub mod builder;
