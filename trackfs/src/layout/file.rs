use binrw::{binrw, io::Cursor, BinRead, BinWriterExt};

use super::{fill_name, name_str};
use crate::{DATA_CAP, NAME_CAP};

/// 数据区的起始偏移
pub const DATA_OFFSET: usize = FileHeader::SIZE;
/// 数据区之后固定为0的字节
pub const ZERO_OFFSET: usize = DATA_OFFSET + DATA_CAP;

#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub name: [u8; NAME_CAP],
    /// 含结尾 \0 在内的数据长度
    pub data_length: u32,
}

impl FileHeader {
    pub const SIZE: usize = NAME_CAP + 4;
}

/// 读入缓冲区的一条文件磁道
#[derive(Debug)]
pub struct FileView<'a> {
    header: FileHeader,
    data: &'a [u8],
}

impl<'a> FileView<'a> {
    pub fn parse(bytes: &'a [u8]) -> Option<Self> {
        let header = FileHeader::read_ne(&mut Cursor::new(bytes)).ok()?;
        let len = header.data_length as usize;
        if len > DATA_CAP {
            return None;
        }
        let data = bytes.get(DATA_OFFSET..DATA_OFFSET + len)?;
        Some(Self { header, data })
    }

    pub fn name(&self) -> &str {
        name_str(&self.header.name)
    }

    pub fn data_length(&self) -> usize {
        self.data.len()
    }

    /// 全部数据，含结尾的 \0
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// 去掉结尾 \0 的内容
    pub fn content(&self) -> &'a [u8] {
        match self.data.split_last() {
            Some((0, content)) => content,
            _ => self.data,
        }
    }
}

/// 在清零后的缓冲区里写一个文件
///
/// 名字与内容长度由调用者检查。
pub fn write_file(bytes: &mut [u8], name: &str, content: &[u8]) -> Option<()> {
    let mut header = FileHeader {
        name: [0; NAME_CAP],
        data_length: u32::try_from(content.len() + 1).ok()?,
    };
    fill_name(&mut header.name, name);
    Cursor::new(&mut *bytes).write_ne(&header).ok()?;

    let data = bytes.get_mut(DATA_OFFSET..=ZERO_OFFSET)?;
    data[..content.len()].copy_from_slice(content);
    data[content.len()] = 0;
    data[DATA_CAP] = 0;
    Some(())
}
