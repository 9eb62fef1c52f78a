use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::MyError;

static CONFIG: OnceLock<MacConfig> = OnceLock::new();

/// `mac`/`pad`子命令未显式给出参数时使用的默认值. <br>
///
/// 依次叠加: 默认值, 环境变量(前缀`GBMAC`, 分隔符`__`, 如`GBMAC_ALGORITHM=DES`), 配置文件. <br>
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct MacConfig {
    pub algorithm: String,

    // 1~8
    pub variant: u8,

    // 1~4
    pub padding: u8,

    // 2008 or 2020
    pub edition: u16,

    // 0 means a full block
    pub mac_bits: usize,
}

impl Default for MacConfig {
    fn default() -> Self {
        Self {
            algorithm: "SM4".to_string(),
            variant: 1,
            padding: 2,
            edition: 2020,
            mac_bits: 0,
        }
    }
}

impl MacConfig {
    /// 尚未加载时只读默认值和环境变量, 失败则使用默认值
    pub fn config() -> &'static Self {
        CONFIG.get_or_init(|| match Self::load(None) {
            Ok(c) => {
                log::trace!("{:?}", c);
                c
            }
            Err(e) => {
                log::warn!("load configuration failed, use the default: {e}");
                Self::default()
            }
        })
    }

    /// 显式给出的配置文件必须存在且格式正确. 只有第一次成功加载的结果生效
    pub fn config_with_file(f: Option<&str>) -> Result<&'static Self, MyError> {
        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let c = Self::load(f)?;
        log::trace!("{:?}", c);
        Ok(CONFIG.get_or_init(|| c))
    }

    fn load(f: Option<&str>) -> Result<Self, MyError> {
        let to_err = |e: config::ConfigError| MyError::ConfigFailed(e.to_string());
        let default_config = Config::try_from(&MacConfig::default()).map_err(to_err)?;

        let mut config = Config::builder().add_source(default_config).add_source(
            config::Environment::with_prefix("GBMAC")
                .try_parsing(true)
                .separator("__"),
        );

        if let Some(f) = f {
            config = config.add_source(config::File::with_name(f).required(true));
        }

        config
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(to_err)
    }
}
