use crate::block_cipher::{
    BlockCipherX, CipherProvider, AES128, AES192, AES256, DES, SM4, TDES2, TDES3,
};
use crate::mac::{DualMac, Engine, KeyInduction, MacVariant, PaddingScheme, Parameters};
use crate::{CipherError, MAC};
use std::collections::HashMap;
use std::sync::Arc;

impl_cipher_type!(
    AlgorithmIdentifier,
    u16,
    [SM4 = 0x1],
    [AES128],
    [AES192],
    [AES256],
    [DES],
    [DESede],
    [DESede3]
);

impl_cipher_type!(Edition, u16, [GBT2008 = 2008], [GBT2020 = 2020]);

impl AlgorithmIdentifier {
    pub fn key_size(&self) -> usize {
        match self {
            Self::SM4 => 128 / 8,
            Self::AES128 => 128 / 8,
            Self::AES192 => 192 / 8,
            Self::AES256 => 256 / 8,
            Self::DES => 64 / 8,
            Self::DESede => 128 / 8,
            Self::DESede3 => 192 / 8,
        }
    }

    pub fn block_size(&self) -> usize {
        match self {
            Self::DES | Self::DESede | Self::DESede3 => 8,
            Self::SM4 | Self::AES128 | Self::AES192 | Self::AES256 => 16,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SM4 => "SM4",
            Self::AES128 => "AES128",
            Self::AES192 => "AES192",
            Self::AES256 => "AES256",
            Self::DES => "DES",
            Self::DESede => "DESede",
            Self::DESede3 => "DESede3",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CipherError> {
        let lower = name.to_ascii_lowercase().replace(['-', '_'], "");
        Self::ALL
            .iter()
            .find(|x| x.name().to_ascii_lowercase() == lower)
            .copied()
            .ok_or(CipherError::UnsupportedAlgorithm(name.to_string()))
    }
}

impl CipherProvider for AlgorithmIdentifier {
    fn name(&self) -> &str {
        AlgorithmIdentifier::name(self)
    }

    fn block_size(&self) -> usize {
        AlgorithmIdentifier::block_size(self)
    }

    // 同族算法按密钥长度选择
    fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn BlockCipherX>, CipherError> {
        let cipher: Box<dyn BlockCipherX> = match (self.block_size(), key.len()) {
            (16, 16) if *self == Self::SM4 => Box::new(SM4::new(key)?),
            (16, 16) => Box::new(AES128::new(key)?),
            (16, 24) if *self != Self::SM4 => Box::new(AES192::new(key)?),
            (16, 32) if *self != Self::SM4 => Box::new(AES256::new(key)?),
            (8, 8) => Box::new(DES::new(key)?),
            (8, 16) => Box::new(TDES2::new(key)?),
            (8, 24) => Box::new(TDES3::new(key)?),
            _ => {
                return Err(CipherError::InvalidKeySize {
                    target: self.key_size(),
                    real: key.len(),
                })
            }
        };

        Ok(cipher)
    }
}

/// 算法标识到分组密码提供者的映射, 由调用者持有并传给MAC引擎. <br>
#[derive(Clone)]
pub struct CipherRegistry {
    providers: HashMap<AlgorithmIdentifier, Arc<dyn CipherProvider>>,
}

impl Default for CipherRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for &id in AlgorithmIdentifier::ALL {
            registry.register(id, Arc::new(id));
        }
        registry
    }
}

impl CipherRegistry {
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: AlgorithmIdentifier, provider: Arc<dyn CipherProvider>) {
        self.providers.insert(id, provider);
    }

    pub fn provider(&self, id: AlgorithmIdentifier) -> Result<Arc<dyn CipherProvider>, CipherError> {
        self.providers
            .get(&id)
            .cloned()
            .ok_or(CipherError::UnsupportedAlgorithm(id.name().to_string()))
    }

    pub fn algorithms(&self) -> Vec<AlgorithmIdentifier> {
        let mut ids = self.providers.keys().copied().collect::<Vec<_>>();
        ids.sort_by_key(|x| *x as u16);
        ids
    }
}

/// 按标准版本选择MAC实现: 2008版算法5/6使用双引擎构造, 算法2默认使用取补派生子密钥. <br>
#[derive(Clone)]
pub struct MacBuilder {
    algorithm: AlgorithmIdentifier,
    edition: Edition,
    variant: MacVariant,
    padding: PaddingScheme,
    mac_bits: Option<usize>,
    key_induction: Option<KeyInduction>,
}

impl MacBuilder {
    pub fn new(algorithm: AlgorithmIdentifier) -> Self {
        Self {
            algorithm,
            edition: Edition::GBT2020,
            variant: MacVariant::Alg1,
            padding: PaddingScheme::Pad1,
            mac_bits: None,
            key_induction: None,
        }
    }

    pub fn edition(mut self, edition: Edition) -> Self {
        self.edition = edition;
        self
    }

    pub fn variant(mut self, variant: MacVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn padding(mut self, padding: PaddingScheme) -> Self {
        self.padding = padding;
        self
    }

    pub fn mac_bits(mut self, mac_bits: usize) -> Self {
        self.mac_bits = Some(mac_bits);
        self
    }

    pub fn key_induction(mut self, key_induction: KeyInduction) -> Self {
        self.key_induction = Some(key_induction);
        self
    }

    pub fn get_variant(&self) -> MacVariant {
        self.variant
    }

    pub fn get_padding(&self) -> PaddingScheme {
        self.padding
    }

    /// 未显式指定时, 2008版使用取补派生, 2020版使用计数器链派生
    pub fn get_key_induction(&self) -> KeyInduction {
        self.key_induction.unwrap_or(match self.edition {
            Edition::GBT2008 => KeyInduction::Legacy,
            Edition::GBT2020 => KeyInduction::Current,
        })
    }

    /// 与本构造器一致的参数: 算法号, 填充方式, 派生方式
    pub fn parameters(&self, key1: &[u8]) -> Parameters {
        Parameters::new(self.variant, self.padding, key1)
            .with_key_induction(self.get_key_induction())
    }

    pub fn is_dual(&self) -> bool {
        self.edition == Edition::GBT2008
            && matches!(self.variant, MacVariant::Alg5 | MacVariant::Alg6)
    }

    pub fn build(&self, registry: &CipherRegistry) -> Result<Box<dyn MAC + Send>, CipherError> {
        let provider = registry.provider(self.algorithm)?;
        let mac_bits = self.mac_bits.unwrap_or(provider.block_size() * 8);

        log::debug!(
            "build {} MAC {:?}/{:?} for edition {:?}",
            self.algorithm.name(),
            self.variant,
            self.padding,
            self.edition
        );

        Ok(if self.is_dual() {
            Box::new(DualMac::with_mac_size(provider, mac_bits)?)
        } else {
            Box::new(
                Engine::with_mac_size(provider, mac_bits)?
                    .with_key_induction(self.get_key_induction()),
            )
        })
    }
}
