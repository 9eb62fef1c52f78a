use crate::Rand;
use xrand::rngs::OsRng;
use xrand::RngCore;

/// 操作系统提供的随机源, 每次取数都直接读取, 不缓存状态 <br>
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultRand {
    rng: OsRng,
}

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}
