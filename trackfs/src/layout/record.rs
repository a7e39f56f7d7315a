use core::slice::ChunksExact;

use binrw::{binrw, io::Cursor, BinRead, BinWriterExt};

use super::{fill_name, name_bytes, name_str};
use crate::{MAX_FILE_COUNT, NAME_CAP};

/// 文件名表的起始偏移
pub const NAMES_OFFSET: usize = 2;

#[binrw]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordHeader {
    pub file_count: u16,
}

/// 0号磁道上的文件记录表
///
/// 第 i 个文件存放在第 i+1 号磁道。
#[derive(Debug)]
pub struct Record<B> {
    bytes: B,
    header: RecordHeader,
}

impl<B: AsRef<[u8]>> Record<B> {
    /// 文件数超过上限时视为损坏
    pub fn parse(bytes: B) -> Option<Self> {
        let header = RecordHeader::read_ne(&mut Cursor::new(bytes.as_ref())).ok()?;
        if usize::from(header.file_count) > MAX_FILE_COUNT
            || bytes.as_ref().len() < NAMES_OFFSET + MAX_FILE_COUNT * NAME_CAP
        {
            return None;
        }
        Some(Self { bytes, header })
    }

    #[inline]
    pub fn file_count(&self) -> usize {
        usize::from(self.header.file_count)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.file_count() == MAX_FILE_COUNT
    }

    pub fn name(&self, slot: usize) -> Option<&str> {
        (slot < self.file_count()).then(|| name_str(self.slot(slot)))
    }

    pub fn names(&self) -> Names<'_> {
        Names::new(self.bytes.as_ref(), self.file_count())
    }

    /// 按字节比较，取第一个匹配的槽
    pub fn position(&self, name: &str) -> Option<usize> {
        (0..self.file_count()).find(|&slot| name_bytes(self.slot(slot)) == name.as_bytes())
    }

    fn slot(&self, slot: usize) -> &[u8] {
        let start = NAMES_OFFSET + slot * NAME_CAP;
        &self.bytes.as_ref()[start..start + NAME_CAP]
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Record<B> {
    /// 在表尾追加一个名字，返回它的槽号
    ///
    /// 名字的合法性与表是否已满由调用者检查。
    pub fn push(&mut self, name: &str) -> Option<usize> {
        let slot = self.file_count();
        let start = NAMES_OFFSET + slot * NAME_CAP;
        fill_name(&mut self.bytes.as_mut()[start..start + NAME_CAP], name);

        self.header.file_count += 1;
        Cursor::new(self.bytes.as_mut())
            .write_ne(&self.header)
            .ok()?;
        Some(slot)
    }
}

impl<'a> Record<&'a [u8]> {
    pub fn into_names(self) -> Names<'a> {
        Names::new(self.bytes, self.file_count())
    }
}

/// 按表中顺序遍历文件名，可以克隆后重新遍历
#[derive(Debug, Clone)]
pub struct Names<'a> {
    slots: ChunksExact<'a, u8>,
}

impl<'a> Names<'a> {
    fn new(bytes: &'a [u8], count: usize) -> Self {
        let names = &bytes[NAMES_OFFSET..NAMES_OFFSET + count * NAME_CAP];
        Self {
            slots: names.chunks_exact(NAME_CAP),
        }
    }
}

impl<'a> Iterator for Names<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(name_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for Names<'_> {}
