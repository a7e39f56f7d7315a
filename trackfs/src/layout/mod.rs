//! # 磁盘数据结构层
//!
//! ```text
//! 磁道 0      | 文件记录表：文件数 + 119 个文件名槽
//! 磁道 1..119 | 每条一个文件：文件名 + 数据长度 + 数据
//! ```
//!
//! 多字节整数按本机字节序存放。

mod file;
mod record;

pub use self::{
    file::{write_file, FileHeader, FileView, DATA_OFFSET, ZERO_OFFSET},
    record::{Names, Record, RecordHeader, NAMES_OFFSET},
};

/// 槽内第一个 \0 之前的字节，没有 \0 则取整个槽
fn name_bytes(slot: &[u8]) -> &[u8] {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    &slot[..end]
}

/// 名字按 UTF-8 解释，非法字节之后的部分被截掉
fn name_str(slot: &[u8]) -> &str {
    let bytes = name_bytes(slot);
    match core::str::from_utf8(bytes) {
        Ok(name) => name,
        Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
    }
}

/// 把名字写进槽里，剩余部分补0
fn fill_name(slot: &mut [u8], name: &str) {
    slot.fill(0);
    slot[..name.len()].copy_from_slice(name.as_bytes());
}
