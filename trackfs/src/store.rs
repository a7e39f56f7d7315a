//! # 磁道存储层
//!
//! 整个文件系统只有一个暂存缓冲区，所有磁道读写都经过它。

use track_dev::{DeviceError, StagingBuffer, TrackDevice};

use crate::TrackIndex;

pub struct TrackStore<D> {
    device: D,
    buffer: StagingBuffer,
}

impl<D: TrackDevice> TrackStore<D> {
    pub fn new(device: D, buffer: StagingBuffer) -> Self {
        Self { device, buffer }
    }

    /// 把磁道读入暂存缓冲区
    pub fn read_buffer(&mut self, track: TrackIndex) -> Result<(), DeviceError> {
        log::trace!("store: read track {track}");
        self.device.read_track(track.into(), &mut self.buffer)
    }

    /// 把暂存缓冲区整个写到磁道
    pub fn write_buffer(&mut self, track: TrackIndex) -> Result<(), DeviceError> {
        log::trace!("store: write track {track}");
        self.device.write_track(track.into(), &self.buffer)
    }
}

impl<D> TrackStore<D> {
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_parts(self) -> (D, StagingBuffer) {
        (self.device, self.buffer)
    }
}
