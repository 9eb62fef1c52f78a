//! # Recommendation for Block Cipher Mode of Operation: Method and Techniques
//!
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//!
//! ## The Cipher Block Chaining Mode(CBC)
//!
//! 给定初始向量IV, IV可以不保密. <br>
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//! $$
//!
//! 基于分组密码的MAC都建立在CBC链之上, 最后一个密文分组即是MAC的原始值. <br>
//!

mod padding;
pub use padding::{BlockPadding, DefaultPadding, ZeroPadding};

mod cbc;
pub use cbc::CbcChain;
