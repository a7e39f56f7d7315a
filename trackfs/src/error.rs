use derive_more::Display;
use track_dev::DeviceError;

use crate::TrackIndex;

pub type Result<T> = core::result::Result<T, Error>;

/// 超出的上限
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    #[display(fmt = "file count")]
    Files,
    #[display(fmt = "name length")]
    NameLength,
    #[display(fmt = "content length")]
    ContentLength,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display(fmt = "device error: {}", _0)]
    Device(DeviceError),
    #[display(fmt = "file not found")]
    NotFound,
    #[display(fmt = "file already exists")]
    AlreadyExists,
    /// 空名字或含有 \0
    #[display(fmt = "invalid file name")]
    InvalidName,
    /// 参数中含有 \0
    #[display(fmt = "invalid argument")]
    InvalidArgument,
    #[display(fmt = "{} exceeds capacity", _0)]
    CapacityExceeded(Capacity),
    /// 记录表已更新，但文件内容没能写入
    #[display(fmt = "directory updated but track {} not written: {}", track, cause)]
    PartialWrite { track: TrackIndex, cause: DeviceError },
    /// 磁道内容无法按布局解析
    #[display(fmt = "track {} is corrupt", _0)]
    Corrupt(TrackIndex),
}

impl From<DeviceError> for Error {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}
