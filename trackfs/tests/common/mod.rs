#![allow(dead_code)]

use track_dev::{DeviceError, StagingBuffer, TrackDevice, TRACK_COUNT, TRACK_SIZE};
use trackfs::TrackFileSystem;

/// 内存里的整张盘，记录每次读写的磁道
pub struct RamDisk {
    tracks: Vec<Box<[u8]>>,
    pub reads: Vec<usize>,
    pub writes: Vec<(usize, usize)>,
    pub fail_writes_to: Option<usize>,
}

impl RamDisk {
    pub fn new() -> Self {
        Self {
            tracks: (0..TRACK_COUNT)
                .map(|_| vec![0u8; TRACK_SIZE].into_boxed_slice())
                .collect(),
            reads: Vec::new(),
            writes: Vec::new(),
            fail_writes_to: None,
        }
    }

    pub fn track(&self, track: usize) -> &[u8] {
        &self.tracks[track]
    }

    pub fn track_mut(&mut self, track: usize) -> &mut [u8] {
        &mut self.tracks[track]
    }
}

impl TrackDevice for RamDisk {
    fn read_track(&mut self, track: usize, buf: &mut StagingBuffer) -> Result<(), DeviceError> {
        let data = self
            .tracks
            .get(track)
            .ok_or(DeviceError::OutOfRange { track })?;
        buf.copy_from_slice(data);
        self.reads.push(track);
        Ok(())
    }

    fn write_track(&mut self, track: usize, buf: &StagingBuffer) -> Result<(), DeviceError> {
        if self.fail_writes_to == Some(track) {
            return Err(DeviceError::Medium { track });
        }
        let data = self
            .tracks
            .get_mut(track)
            .ok_or(DeviceError::OutOfRange { track })?;
        data.copy_from_slice(buf);
        self.writes.push((track, buf.len()));
        Ok(())
    }
}

pub fn mount(disk: RamDisk) -> TrackFileSystem<RamDisk> {
    TrackFileSystem::install(disk, StagingBuffer::boxed())
}

pub fn fresh() -> TrackFileSystem<RamDisk> {
    mount(RamDisk::new())
}

pub fn disk(fs: &TrackFileSystem<RamDisk>) -> &RamDisk {
    fs.store().device()
}

pub fn disk_mut(fs: &mut TrackFileSystem<RamDisk>) -> &mut RamDisk {
    fs.store_mut().device_mut()
}
