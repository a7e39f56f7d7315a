#![no_std]

extern crate alloc;

/* trackfs 的整体架构，自上而下 */

// 文件层：实现文件的创建、读取与执行
mod fs;

// 目录记录层：0号磁道上的文件名表
pub mod directory;

// 磁道存储层：暂存缓冲区与磁道之间的读写
mod store;

// 磁盘数据结构层：表示磁道上的数据结构
pub mod layout;

// 把文件数据当作函数调用的边界
pub mod exec;

mod error;

use derive_more::{Display, From, Into};

pub use self::{
    error::{Capacity, Error, Result},
    fs::TrackFileSystem,
    layout::{FileView, Names},
    store::TrackStore,
};
pub use track_dev::{StagingBuffer, TrackDevice, TRACK_SIZE};

/// 文件数上限：除0号外每条磁道一个文件
pub const MAX_FILE_COUNT: usize = 119;
/// 文件名槽的大小，含结尾的 \0
pub const NAME_CAP: usize = 60;
/// 文件名的最大字节数
pub const NAME_MAX_LEN: usize = NAME_CAP - 1;
/// 文件数据区的容量
pub const DATA_CAP: usize = TRACK_SIZE - NAME_CAP - 33;
/// 文件内容的最大字节数，数据区还要放一个结尾的 \0
pub const CONTENT_MAX_LEN: usize = DATA_CAP - 1;

/// 磁道编号，0号为文件记录表
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[repr(transparent)]
pub struct TrackIndex(usize);

impl TrackIndex {
    pub const RECORD: Self = Self(0);

    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// 记录表中第 `slot` 个文件所在的磁道
    pub const fn of_slot(slot: usize) -> Self {
        Self(slot + 1)
    }
}
