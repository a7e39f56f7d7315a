
use std::io::{self, Read, Seek, SeekFrom, Write};

use track_dev::{DeviceError, StagingBuffer, TrackDevice, TRACK_COUNT, TRACK_SIZE};

/// 两个磁头各 9KiB
pub const CYLINDER_SIZE: u64 = 2 * 18 * 512;
/// 默认映像覆盖文件系统用到的全部磁道
pub const DEFAULT_CYLINDERS: usize = TRACK_COUNT;

/// 把软盘映像文件当作磁道设备
///
/// 第 n 条磁道位于映像的 `n * CYLINDER_SIZE` 处，只用到每个柱面的前 16KiB。
pub struct ImageFile<F> {
    file: F,
    cylinders: usize,
}

impl<F: Read + Write + Seek> ImageFile<F> {
    pub fn new(file: F) -> Self {
        Self::with_cylinders(file, DEFAULT_CYLINDERS)
    }

    pub fn with_cylinders(file: F, cylinders: usize) -> Self {
        Self { file, cylinders }
    }

    /// 映像应有的字节数
    pub fn image_len(&self) -> u64 {
        self.cylinders as u64 * CYLINDER_SIZE
    }

    pub fn into_inner(self) -> F {
        self.file
    }

    fn seek(&mut self, track: usize) -> Result<(), DeviceError> {
        if track >= self.cylinders {
            return Err(DeviceError::OutOfRange { track });
        }
        self.file
            .seek(SeekFrom::Start(track as u64 * CYLINDER_SIZE))
            .map(drop)
            .map_err(|err| medium(track, err))
    }
}

fn medium(track: usize, err: io::Error) -> DeviceError {
    log::error!("image: track {track}: {err}");
    DeviceError::Medium { track }
}

impl<F: Read + Write + Seek> TrackDevice for ImageFile<F> {
    fn read_track(&mut self, track: usize, buf: &mut StagingBuffer) -> Result<(), DeviceError> {
        self.seek(track)?;
        self.file
            .read_exact(&mut buf[..TRACK_SIZE])
            .map_err(|err| medium(track, err))
    }

    fn write_track(&mut self, track: usize, buf: &StagingBuffer) -> Result<(), DeviceError> {
        self.seek(track)?;
        self.file
            .write_all(&buf[..TRACK_SIZE])
            .and_then(|()| self.file.flush())
            .map_err(|err| medium(track, err))
    }
}
