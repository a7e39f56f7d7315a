//! # 磁道设备接口层
//!
//! 软盘以**磁道**（此处即一个柱面）为单位交换数据，
//! [`TrackDevice`] 就是对读写磁道设备的抽象，
//! 实现了此特质的类型称为**磁道设备驱动**。
//!
//! 所有数据都经由唯一的暂存缓冲区 [`StagingBuffer`] 在内存与介质之间搬运。

#![no_std]

extern crate alloc;

mod buffer;
mod error;

pub use self::{
    buffer::{DmaRegion, StagingBuffer},
    error::{DeviceError, Stage},
};

/// 一个磁道（柱面）中被使用的字节数，也是 DMA 缓冲区的大小
pub const TRACK_SIZE: usize = 0x4000;
/// 介质上可寻址的磁道数
pub const TRACK_COUNT: usize = 120;

/// 磁道设备驱动特质
pub trait TrackDevice {
    /// 把第 `track` 条磁道的完整内容读入缓冲区
    fn read_track(&mut self, track: usize, buf: &mut StagingBuffer) -> Result<(), DeviceError>;

    /// 把整个缓冲区写到第 `track` 条磁道
    fn write_track(&mut self, track: usize, buf: &StagingBuffer) -> Result<(), DeviceError>;
}
