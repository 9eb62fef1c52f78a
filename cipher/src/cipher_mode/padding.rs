pub trait BlockPadding {
    /// 填充到`padding_len`字节长度的整数倍
    fn new(padding_len: usize) -> Self;

    /// 整段数据填充
    fn padding(&self, buf: &mut Vec<u8>);

    /// 对最后一个分组填充, `used`是分组中已有数据的字节数
    fn pad_block(&self, block: &mut [u8], used: usize);
}

/// 填充`0x00`使得数据字节长度是分组长度的整数倍, 已对齐时不填充. <br>
#[derive(Copy, Clone, Debug)]
pub struct ZeroPadding {
    block_size: usize,
}

impl BlockPadding for ZeroPadding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let r = buf.len() % self.block_size;
        if r != 0 {
            buf.resize(buf.len() + self.block_size - r, 0);
        }
    }

    fn pad_block(&self, block: &mut [u8], used: usize) {
        block[used..].fill(0);
    }
}

/// 填充`0x80`, 再补充若干个`0x00`以使得填充后的数据字节长度是分组长度的整数倍. <br>
#[derive(Copy, Clone, Debug)]
pub struct DefaultPadding {
    block_size: usize,
}

impl BlockPadding for DefaultPadding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        buf.push(0x80);
        let r = buf.len() % self.block_size;
        if r != 0 {
            buf.resize(buf.len() + self.block_size - r, 0);
        }
    }

    fn pad_block(&self, block: &mut [u8], used: usize) {
        block[used] = 0x80;
        block[used + 1..].fill(0);
    }
}
