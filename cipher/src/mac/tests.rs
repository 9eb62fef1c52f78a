use super::tool::{self, cbc_mac_chained, cmac, compute_mac, compute_mac_dual};
use super::{Engine, KeyInduction, MacVariant, PaddingScheme, Parameters};
use crate::builder::{AlgorithmIdentifier, CipherRegistry, Edition, MacBuilder};
use crate::cipher_mode::CbcChain;
use crate::{DefaultRand, Rand, MAC};
use std::io::Write;
use std::sync::Arc;

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

// (算法号, 填充方式, 是否使用key2, 消息序号, MAC)
type Case = (u8, u8, bool, usize, &'static str);

fn run_cases(
    id: AlgorithmIdentifier,
    edition: Edition,
    key1: &[u8],
    key2: &[u8],
    msgs: &[Vec<u8>],
    cases: &[Case],
) {
    let registry = CipherRegistry::default();
    for (i, &(v, p, use_key2, m, tgt)) in cases.iter().enumerate() {
        let (variant, padding) = (
            MacVariant::try_from(v).unwrap(),
            PaddingScheme::try_from(p).unwrap(),
        );
        let msg = &msgs[m];
        let builder = MacBuilder::new(id)
            .edition(edition)
            .variant(variant)
            .padding(padding)
            .mac_bits(tgt.len() * 4);

        // 派生方式由构造器按版本决定
        let mut params = Parameters::new(variant, padding, key1).with_message_len(msg.len());
        if use_key2 {
            params = params.with_key2(key2);
        }

        let mut mac = builder.build(&registry).unwrap();
        mac.init(&params).unwrap();
        mac.update(msg).unwrap();
        let tag = mac.mac().unwrap();
        assert_eq!(
            hex::encode_upper(tag),
            tgt,
            "case {i} variant {v} padding {p} failed"
        );
    }
}

#[test]
fn gbt15852_2008_des() {
    let key1 = h("0123456789ABCDEF");
    let key2 = h("FEDCBA9876543210");
    // "Now is the time for all ", "Now is the time for it"
    let msgs = [
        h("4e6f77206973207468652074696d6520666f7220616c6c20"),
        h("4e6f77206973207468652074696d6520666f72206974"),
    ];

    let cases: [Case; 36] = [
        (1, 1, false, 0, "70A30640"),
        (1, 2, false, 0, "10E1F0F1"),
        (1, 3, false, 0, "2C58FB8F"),
        (1, 1, false, 1, "E45B3AD2"),
        (1, 2, false, 1, "A924C721"),
        (1, 3, false, 1, "B1ECD6FC"),
        (2, 1, false, 0, "10F9BC67"),
        (2, 2, false, 0, "BE7C2AB7"),
        (2, 3, false, 0, "8EFC8BC7"),
        (2, 1, false, 1, "215E9CE6"),
        (2, 2, false, 1, "1736AC1A"),
        (2, 3, false, 1, "05382696"),
        (3, 1, true, 0, "A1C72E74"),
        (3, 2, true, 0, "E9086230"),
        (3, 3, true, 0, "AB059463"),
        (3, 1, true, 1, "2E2B1428"),
        (3, 2, true, 1, "5A692CE6"),
        (3, 3, true, 1, "C59F7EED"),
        (4, 1, true, 0, "AD3502B7"),
        (4, 2, true, 0, "61C333E3"),
        (4, 3, true, 0, "952AF838"),
        (4, 1, true, 1, "05F1084C"),
        (4, 2, true, 1, "A1BC0931"),
        (4, 3, true, 1, "AFDEE0F9"),
        (5, 1, false, 0, "F4E402B6B72C1317"),
        (5, 2, false, 0, "70F05EC9E4F72F99"),
        (5, 3, false, 0, "D61F51F2EA2A2D63"),
        (5, 1, false, 1, "0F24BDA4AC220F4F"),
        (5, 2, false, 1, "E00413419AFC160B"),
        (5, 3, false, 1, "DDDF5ED30F18EBFC"),
        (6, 1, true, 0, "577EF22118CE5DBA"),
        (6, 2, true, 0, "607460B8D8C0FDFA"),
        (6, 3, true, 0, "FD3DBB6EF1650754"),
        (6, 1, true, 1, "10F747D14F72C229"),
        (6, 2, true, 1, "B29B9A76DD1C3912"),
        (6, 3, true, 1, "F645FB7D4D4A42B4"),
    ];

    run_cases(
        AlgorithmIdentifier::DES,
        Edition::GBT2008,
        &key1,
        &key2,
        &msgs,
        &cases,
    );
}

#[test]
fn gbt15852_2020_sm4() {
    let key1 = h("0123456789ABCDEFFEDCBA9876543210");
    let key2 = h("4149D2ADED9456681EC8B511D9E7EE04");
    let msgs = [
        b"This is the test message for mac".to_vec(),
        b"This is the test message ".to_vec(),
    ];

    let cases: [Case; 36] = [
        (1, 1, false, 0, "16E02904EFB765B7"),
        (1, 2, false, 0, "4B6553AF3C4E2744"),
        (1, 3, false, 0, "71AF7E4553404CBC"),
        (1, 1, false, 1, "BA89E45FE8ABF242"),
        (1, 2, false, 1, "421AD1690AA152E2"),
        (1, 3, false, 1, "6A4A86F5B5E468DA"),
        (2, 1, true, 0, "1E9A71D3BC92DFA7"),
        (2, 2, true, 0, "E423E35599AFD948"),
        (2, 3, true, 0, "4003BA1B6ADC53A8"),
        (2, 1, true, 1, "4EC3C7FACFAAC607"),
        (2, 2, true, 1, "F02625CEAD008D4E"),
        (2, 3, true, 1, "FFD5F1F2E5EDA5CB"),
        (3, 1, true, 0, "2763211B2BCAF719"),
        (3, 2, true, 0, "51E9928C2238330C"),
        (3, 3, true, 0, "7CD48C4242E45575"),
        (3, 1, true, 1, "E32D99A689C05259"),
        (3, 2, true, 1, "197247229CE9D7B6"),
        (3, 3, true, 1, "3C430F1EA43B540C"),
        (4, 1, true, 0, "DD1052A7AFE8999B"),
        (4, 2, true, 0, "7E1A9A5E0EF0947F"),
        (4, 3, true, 0, "28A70D6BCCF74422"),
        (4, 1, true, 1, "AA9DB3D9651F862B"),
        (4, 2, true, 1, "949476D35F17261E"),
        (4, 3, true, 1, "C9D34E16C49AB643"),
        (5, 4, false, 0, "692C437100F3B5EE"),
        (5, 4, false, 1, "4738A6C760B280FC"),
        (6, 1, false, 0, "B38A96195BAA61FC"),
        (6, 2, false, 0, "A0C465EE5896972F"),
        (6, 3, false, 0, "43050D51C656AE60"),
        (6, 1, false, 1, "8CF6E64314FEF417"),
        (6, 2, false, 1, "60DD955ED0CA3D7A"),
        (6, 3, false, 1, "61E00049E26962A3"),
        (7, 4, false, 0, "16E02904EFB765B7"),
        (7, 4, false, 1, "846FA2A5D83445A9"),
        (8, 4, false, 0, "E40ED79C3149A1C9"),
        (8, 4, false, 1, "A99D13013E892EE2"),
    ];

    run_cases(
        AlgorithmIdentifier::SM4,
        Edition::GBT2020,
        &key1,
        &key2,
        &msgs,
        &cases,
    );
}

#[test]
fn dual_mac_direct() {
    let key1 = h("0123456789ABCDEF");
    let key2 = h("FEDCBA9876543210");
    let msg = h("4e6f77206973207468652074696d6520666f7220616c6c20");
    let provider = Arc::new(AlgorithmIdentifier::DES);

    let params = Parameters::new(MacVariant::Alg5, PaddingScheme::Pad1, &key1);
    let tag = compute_mac_dual(provider.clone(), &params, 64, &msg).unwrap();
    assert_eq!(hex::encode_upper(tag), "F4E402B6B72C1317");

    let params = Parameters::new(MacVariant::Alg6, PaddingScheme::Pad3, &key1)
        .with_key2(&key2)
        .with_message_len(msg.len());
    let tag = compute_mac_dual(provider, &params, 64, &msg).unwrap();
    assert_eq!(hex::encode_upper(tag), "FD3DBB6EF1650754");
}

#[test]
fn cmac_sp800_38b() {
    let msg = h(
        "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51\
         30c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710",
    );

    let cases = [
        (
            AlgorithmIdentifier::AES128,
            "2b7e151628aed2a6abf7158809cf4f3c",
            vec![
                (0usize, "bb1d6929e95937287fa37d129b756746"),
                (16, "070a16b46b4d4144f79bdd9dd04a287c"),
                (20, "7d85449ea6ea19c823a7bf78837dfade"),
                (40, "dfa66747de9ae63030ca32611497c827"),
                (64, "51f0bebf7e3b9d92fc49741779363cfe"),
            ],
        ),
        (
            AlgorithmIdentifier::AES192,
            "8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b",
            vec![
                (0, "d17ddf46adaacde531cac483de7a9367"),
                (16, "9e99a7bf31e710900662f65e617c5184"),
                (40, "8a1de5be2eb31aad089a82e6ee908b0e"),
                (64, "a1d5df0eed790f794d77589659f39a11"),
            ],
        ),
        (
            AlgorithmIdentifier::AES256,
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
            vec![
                (0, "028962f61b7bf89efc6b551f4667d983"),
                (16, "28a7023f452e8f82bd4bf28d8c37c35c"),
                (40, "aaf3d8f1de5640c232f5b169b9c911e6"),
                (64, "e1992190549f6ed5696a2c056c315410"),
            ],
        ),
        (
            AlgorithmIdentifier::DESede3,
            "8aa83bf8cbda10620bc1bf19fbb6cd58bc313d4a371ca8b5",
            vec![
                (0, "b7a688e122ffaf95"),
                (8, "8e8f293136283797"),
                (20, "743ddbe0ce2dc2ed"),
                (32, "33e6b1092400eae5"),
            ],
        ),
        (
            AlgorithmIdentifier::DESede,
            "4cf15134a2850dd58a3d10ba80570d38",
            vec![
                (0, "bd2ebf9a3ba00361"),
                (8, "4ff2ab813c53ce83"),
                (20, "62dd1b471902bd4e"),
                (32, "31b1e431dabc4eb8"),
            ],
        ),
    ];

    let registry = CipherRegistry::default();
    for (i, (id, key, case)) in cases.into_iter().enumerate() {
        let key = h(key);
        for (j, (len, tgt)) in case.into_iter().enumerate() {
            let provider = registry.provider(id).unwrap();
            let tag = cmac(provider, &key, None, &msg[..len]).unwrap();
            assert_eq!(hex::encode(tag), tgt, "case {i}-{j} failed");
        }
    }
}

#[test]
fn cmac_against_reference() {
    use ::cmac::{Cmac, Mac};

    macro_rules! reference {
        ($C: ty, $key: expr, $msg: expr) => {{
            let mut mac = <Cmac<$C> as Mac>::new_from_slice($key).unwrap();
            mac.update($msg);
            mac.finalize().into_bytes().to_vec()
        }};
    }

    let mut rng = DefaultRand::default();
    for len in [0usize, 1, 7, 8, 15, 16, 17, 31, 32, 33, 100, 257] {
        let msg = rng.next_bytes(len);

        let key = rng.next_bytes(16);
        let tag = cmac(Arc::new(AlgorithmIdentifier::AES128), &key, None, &msg).unwrap();
        assert_eq!(tag, reference!(::aes::Aes128, &key, &msg), "aes128 {len} failed");

        let key = rng.next_bytes(24);
        let tag = cmac(Arc::new(AlgorithmIdentifier::AES192), &key, None, &msg).unwrap();
        assert_eq!(tag, reference!(::aes::Aes192, &key, &msg), "aes192 {len} failed");

        let key = rng.next_bytes(32);
        let tag = cmac(Arc::new(AlgorithmIdentifier::AES256), &key, None, &msg).unwrap();
        assert_eq!(tag, reference!(::aes::Aes256, &key, &msg), "aes256 {len} failed");

        let key = rng.next_bytes(16);
        let tag = cmac(Arc::new(AlgorithmIdentifier::DESede), &key, None, &msg).unwrap();
        assert_eq!(tag, reference!(::des::TdesEde2, &key, &msg), "tdes2 {len} failed");

        let key = rng.next_bytes(24);
        let tag = cmac(Arc::new(AlgorithmIdentifier::DESede3), &key, None, &msg).unwrap();
        assert_eq!(tag, reference!(::des::TdesEde3, &key, &msg), "tdes3 {len} failed");
    }
}

#[test]
fn sm4_cbc_mac_with_iv() {
    let cases = [
        (
            "EEF3C9888129755F2C769DBC459448CE",
            "FBD7B7AB0793F814B28A970F9E859C05",
            "99C9D02D03F2CD394A680DC51B112322",
            "530EDF0605A302F30096AE46BD6316AF",
        ),
        (
            "973270DF92EFF5EC1E170A1566098CB3",
            "2C2A98AF53A684F19DF3C39B721FA27E",
            "AADA15E99FE95171B6F15FD3E427976EB1B595FCA82A23AC00C7AC7CEF9DDED7",
            "CF505945E5C135BC2BB4588D17E404D4",
        ),
        (
            "F82B569F5D3DCB61D0BE8778BF05D1B0",
            "791004096432F985F7BE6B5CDAC79EB8",
            "F76C0ADA8374F1D0C4B7EC5CC5047E03CF83B7A9ECE3777CFAEEC940ECE815CA\
             E2FAA69EFAAC61A142C882CCC772E653",
            "651AF0AA9D73D2C6460DAEC83738AE3C",
        ),
        (
            "ABC854B48BD5811E22DDBB513313C858",
            "500D6DD1001962FE4727C117ACDE2C4E",
            "E0D1F45DB6C3DB00F954062DB748162F5FF589645686F61592A98574334BE914\
             42B8BCDB331887D7D3873EDB63EFA4E41FA3BC66BA9BDBD9F02A6CF6D6116044",
            "AA54E04FC85B56C2CEB1D58E122ADB79",
        ),
        (
            "3CA7EF836755B8D4A1F981A596DB17E8",
            "607B652B1E129F6900FDF21D833AED4B",
            "DF8C24D34145C12B335852E9F23468A9EA01C3A356FD07017F55706BF403D4A4\
             B1C0E4C9448D18F62FFEB58DACC857F273ABFC4C064E05B4B2DBA149E1CBA7DE\
             C6A3809AD916306C48A5F564B1378356",
            "C5C98AC7CD492D4192706C7CCC6C9F79",
        ),
    ];

    for (i, (key, iv, pt, tgt)) in cases.into_iter().enumerate() {
        let (key, pt) = (h(key), h(pt));
        let mut chain = h(iv);
        let tag = cbc_mac_chained(Arc::new(AlgorithmIdentifier::SM4), &key, Some(chain.as_mut_slice()), &pt)
            .unwrap();
        assert_eq!(hex::encode_upper(&tag), tgt, "case {i} failed");
        assert_eq!(chain, tag, "case {i} failed");
    }
}

#[test]
fn cbc_mac_chained_split() {
    let provider = Arc::new(AlgorithmIdentifier::SM4);
    let key = h("3CA7EF836755B8D4A1F981A596DB17E8");
    let iv = h("607B652B1E129F6900FDF21D833AED4B");
    let mut rng = DefaultRand::default();
    let msg = rng.next_bytes(16 * 7 + 5);

    let mut whole = iv.clone();
    let tgt = cbc_mac_chained(provider.clone(), &key, Some(whole.as_mut_slice()), &msg).unwrap();

    // 除最后一段外按分组对齐切分
    for splits in [vec![16usize], vec![32, 48], vec![16, 16, 16, 16, 16, 16, 16]] {
        let mut chain = iv.clone();
        let mut rest = msg.as_slice();
        for s in splits.iter() {
            cbc_mac_chained(provider.clone(), &key, Some(chain.as_mut_slice()), &rest[..*s]).unwrap();
            rest = &rest[*s..];
        }
        let tag = cbc_mac_chained(provider.clone(), &key, Some(chain.as_mut_slice()), rest).unwrap();
        assert_eq!(tag, tgt, "splits {splits:?} failed");
    }
}

#[test]
fn variant3_without_key2_equals_variant1() {
    let mut rng = DefaultRand::default();
    for id in AlgorithmIdentifier::ALL.iter().copied() {
        let key = rng.next_bytes(id.key_size());
        let msg = rng.next_bytes(45);
        for p in PaddingScheme::ALL.iter().copied() {
            let bits = id.block_size() * 8;
            let p1 = Parameters::new(MacVariant::Alg1, p, &key).with_message_len(msg.len());
            let p3 = Parameters::new(MacVariant::Alg3, p, &key).with_message_len(msg.len());
            assert_eq!(
                compute_mac(Arc::new(id), &p1, bits, &msg).unwrap(),
                compute_mac(Arc::new(id), &p3, bits, &msg).unwrap(),
                "{id:?} {p:?} failed"
            );
        }
    }
}

#[test]
fn padding_matches_engine() {
    let mut rng = DefaultRand::default();
    for id in [AlgorithmIdentifier::DES, AlgorithmIdentifier::SM4] {
        let n = id.block_size();
        let key = rng.next_bytes(id.key_size());
        for len in [1usize, n - 1, n, n + 1, 3 * n, 3 * n + 2] {
            let msg = rng.next_bytes(len);
            for p in PaddingScheme::ALL.iter().copied() {
                let params = Parameters::new(MacVariant::Alg1, p, &key).with_message_len(len);
                let tag = compute_mac(Arc::new(id), &params, n * 8, &msg).unwrap();

                // 对整段填充后的数据做CBC
                let padded = tool::padding(p, &msg, n);
                assert_eq!(padded.len() % n, 0);
                let mut chain = CbcChain::new(Arc::new(id));
                chain.init(true, &key, None).unwrap();
                let mut last = vec![0u8; n];
                for blk in padded.chunks(n) {
                    chain.process_block(blk, &mut last).unwrap();
                }
                assert_eq!(tag, last, "{id:?} {p:?} len {len} failed");
            }
        }
    }
}

#[test]
fn output_size_bound() {
    let mut rng = DefaultRand::default();
    let registry = CipherRegistry::default();
    for id in registry.algorithms() {
        let n = id.block_size();
        let key = rng.next_bytes(id.key_size());
        let key2 = rng.next_bytes(id.key_size());
        let msg = rng.next_bytes(3 * n + 1);
        for v in MacVariant::ALL.iter().copied() {
            for bits in (8..=n * 8).step_by(8) {
                let params = Parameters::new(v, PaddingScheme::Pad2, &key).with_key2(&key2);
                let tag = compute_mac(registry.provider(id).unwrap(), &params, bits, &msg).unwrap();
                assert_eq!(tag.len(), bits / 8, "{id:?} {v:?} {bits} failed");
            }
        }
    }
}

#[test]
fn derived_keys_for_all_key_sizes() {
    // 未给出key2时, 2020版的派生对各种密钥长度都可用
    let mut rng = DefaultRand::default();
    for id in AlgorithmIdentifier::ALL.iter().copied() {
        let key = rng.next_bytes(id.key_size());
        let msg = rng.next_bytes(33);
        for v in MacVariant::ALL.iter().copied() {
            let params = Parameters::new(v, PaddingScheme::Pad4, &key);
            let res = compute_mac(Arc::new(id), &params, 32, &msg);
            assert!(res.is_ok(), "{id:?} {v:?} failed: {res:?}");
        }
    }
}

#[test]
fn reuse_without_leak() {
    let provider = Arc::new(AlgorithmIdentifier::SM4);
    let key1 = h("0123456789ABCDEFFEDCBA9876543210");
    let key2 = h("4149D2ADED9456681EC8B511D9E7EE04");
    let m1 = b"This is the test message for mac".to_vec();
    let m2 = b"This is the test message ".to_vec();

    let pa = Parameters::new(MacVariant::Alg4, PaddingScheme::Pad2, &key1).with_key2(&key2);
    let pb = Parameters::new(MacVariant::Alg8, PaddingScheme::Pad4, &key1);

    let mut engine = Engine::with_mac_size(provider, 64).unwrap();
    for _ in 0..3 {
        engine.init(&pa).unwrap();
        engine.update(&m1).unwrap();
        assert_eq!(hex::encode_upper(engine.mac().unwrap()), "7E1A9A5E0EF0947F");

        engine.init(&pb).unwrap();
        engine.update(&m2).unwrap();
        assert_eq!(hex::encode_upper(engine.mac().unwrap()), "A99D13013E892EE2");

        // 中途重新init
        engine.init(&pa).unwrap();
        engine.update(&m2).unwrap();
        engine.init(&pa).unwrap();
        engine.update(&m1).unwrap();
        assert_eq!(hex::encode_upper(engine.mac().unwrap()), "7E1A9A5E0EF0947F");
    }
}

#[test]
fn streaming_chunks_plain_init() {
    // 初始变换为Plain的算法, 分段输入与一次输入结果一致
    let mut rng = DefaultRand::default();
    let key = rng.next_bytes(16);
    let msg = rng.next_bytes(16 * 5 + 3);
    let provider = Arc::new(AlgorithmIdentifier::AES128);

    for v in [MacVariant::Alg1, MacVariant::Alg2, MacVariant::Alg5, MacVariant::Alg6] {
        let params = Parameters::new(v, PaddingScheme::Pad3, &key)
            .with_message_len(msg.len())
            .with_key_induction(KeyInduction::Current);
        let tgt = compute_mac(provider.clone(), &params, 128, &msg).unwrap();

        let mut engine = Engine::new(provider.clone());
        engine.init(&params).unwrap();
        for chunk in msg.chunks(7) {
            engine.write_all(chunk).unwrap();
        }
        assert_eq!(engine.mac().unwrap(), tgt, "{v:?} failed");
    }
}

#[test]
fn derived_key2_sm4() {
    // 未给出key2, 按2020版派生
    let provider = Arc::new(AlgorithmIdentifier::SM4);
    let key1 = h("0123456789ABCDEFFEDCBA9876543210");
    let msgs = [
        b"This is the test message for mac".to_vec(),
        b"This is the test message ".to_vec(),
    ];

    let cases = [
        (2u8, 1u8, 0usize, "293B817C88EC22CE82A29BB0E34162F0"),
        (2, 1, 0, "293B817C88EC22CE"),
        (2, 1, 1, "21940940BC07DBB4"),
        (2, 2, 0, "F97DC489B11BC7C7"),
        (2, 2, 1, "7EDAFF909E970A61"),
        (2, 3, 0, "C79357A9DFF23158"),
        (2, 3, 1, "B69F74F5B79B2AA1"),
        (4, 1, 0, "ADF695FA8A123822"),
        (4, 1, 1, "2648D450C3B9535D"),
        (4, 2, 0, "74AC6256F66A5E6F"),
        (4, 2, 1, "CA6AC62662DBD029"),
        (4, 3, 0, "DA130DFBC2729CE5"),
        (4, 3, 1, "CB380612ABFC0ED3"),
    ];

    for (i, &(v, p, m, tgt)) in cases.iter().enumerate() {
        let msg = &msgs[m];
        let params = Parameters::new(
            MacVariant::try_from(v).unwrap(),
            PaddingScheme::try_from(p).unwrap(),
            &key1,
        )
        .with_message_len(msg.len());
        let tag = compute_mac(provider.clone(), &params, tgt.len() * 4, msg).unwrap();
        assert_eq!(hex::encode_upper(tag), tgt, "case {i} failed");
    }
}

#[test]
fn variant2_keeps_caller_chain_key() {
    // 算法2: 主链使用key1, 派生的K2只用于输出变换
    let provider = Arc::new(AlgorithmIdentifier::SM4);
    let key1 = h("0123456789ABCDEFFEDCBA9876543210");
    let msg = b"This is the test message for mac";

    let p1 = Parameters::new(MacVariant::Alg1, PaddingScheme::Pad1, &key1);
    let inner = compute_mac(provider.clone(), &p1, 128, msg).unwrap();

    let mut chain = CbcChain::new(provider.clone());
    let (_, k2) = super::KeyInduce::new(&mut chain).induce1(&key1).unwrap();
    let mut out = CbcChain::new(provider.clone());
    out.init(true, &k2, None).unwrap();
    let mut tgt = vec![0u8; 16];
    out.process_block(&inner, &mut tgt).unwrap();

    let p2 = Parameters::new(MacVariant::Alg2, PaddingScheme::Pad1, &key1);
    let tag = compute_mac(provider, &p2, 128, msg).unwrap();
    assert_eq!(tag, tgt);
    assert_eq!(hex::encode_upper(tag), "293B817C88EC22CE82A29BB0E34162F0");
}

#[test]
fn repeated_initial_transform_chunked() {
    // 算法4/8每次缓冲溢出都做初始变换, 分段输入结果与一次输入不同
    let provider = Arc::new(AlgorithmIdentifier::SM4);
    let key1 = h("0123456789ABCDEFFEDCBA9876543210");
    let key2 = h("4149D2ADED9456681EC8B511D9E7EE04");
    let msg = b"This is the test message for macThis is the test message ".to_vec();

    // (算法号, 填充方式, 是否使用key2, 分段, MAC)
    let cases: [(u8, u8, bool, &[usize], &str); 9] = [
        (4, 2, true, &[], "BA7E3095696E1AF1"),
        (4, 2, true, &[20], "C989AE0D6A4B22B9"),
        (4, 4, true, &[16, 16], "C989AE0D6A4B22B9"),
        (8, 2, false, &[], "5794A89CA3B16287"),
        (8, 2, false, &[20], "1D75629C1816B4E4"),
        (8, 4, false, &[16, 16], "1D75629C1816B4E4"),
        (1, 2, false, &[], "92B9678003CE84B5"),
        (1, 2, false, &[20], "92B9678003CE84B5"),
        (1, 4, false, &[16, 16], "92B9678003CE84B5"),
    ];

    for (i, &(v, p, use_key2, splits, tgt)) in cases.iter().enumerate() {
        let mut params = Parameters::new(
            MacVariant::try_from(v).unwrap(),
            PaddingScheme::try_from(p).unwrap(),
            &key1,
        )
        .with_message_len(msg.len());
        if use_key2 {
            params = params.with_key2(&key2);
        }

        let mut engine = Engine::with_mac_size(provider.clone(), 64).unwrap();
        engine.init(&params).unwrap();
        let mut rest = msg.as_slice();
        for s in splits.iter() {
            engine.update(&rest[..*s]).unwrap();
            rest = &rest[*s..];
        }
        engine.update(rest).unwrap();
        assert_eq!(hex::encode_upper(engine.mac().unwrap()), tgt, "case {i} failed");
    }
}
