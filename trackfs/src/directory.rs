//! # 目录记录层
//!
//! 每个操作都先把0号磁道读入暂存缓冲区，不缓存记录表。

use track_dev::TrackDevice;

use crate::{
    layout::{Names, Record},
    Capacity, Error, Result, TrackIndex, TrackStore, NAME_MAX_LEN,
};

/// 文件名不能为空、不能含 \0，且放得进名字槽
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.as_bytes().contains(&0) {
        return Err(Error::InvalidName);
    }
    if name.len() > NAME_MAX_LEN {
        return Err(Error::CapacityExceeded(Capacity::NameLength));
    }
    Ok(())
}

/// 读出记录表，之后的解析都借用暂存缓冲区
pub fn load<D: TrackDevice>(store: &mut TrackStore<D>) -> Result<Record<&[u8]>> {
    store.read_buffer(TrackIndex::RECORD)?;
    Record::parse(store.buffer()).ok_or(Error::Corrupt(TrackIndex::RECORD))
}

/// 登记一个新文件并写回记录表，返回分配给它的磁道
pub fn append<D: TrackDevice>(store: &mut TrackStore<D>, name: &str) -> Result<TrackIndex> {
    validate_name(name)?;
    store.read_buffer(TrackIndex::RECORD)?;

    let mut record =
        Record::parse(store.buffer_mut()).ok_or(Error::Corrupt(TrackIndex::RECORD))?;
    if record.position(name).is_some() {
        return Err(Error::AlreadyExists);
    }
    if record.is_full() {
        return Err(Error::CapacityExceeded(Capacity::Files));
    }
    let slot = record
        .push(name)
        .ok_or(Error::Corrupt(TrackIndex::RECORD))?;

    store.write_buffer(TrackIndex::RECORD)?;
    let track = TrackIndex::of_slot(slot);
    log::debug!("directory: {name:?} -> track {track}");
    Ok(track)
}

pub fn find<D: TrackDevice>(store: &mut TrackStore<D>, name: &str) -> Result<TrackIndex> {
    load(store)?
        .position(name)
        .map(TrackIndex::of_slot)
        .ok_or(Error::NotFound)
}

pub fn list<D: TrackDevice>(store: &mut TrackStore<D>) -> Result<Names<'_>> {
    Ok(load(store)?.into_names())
}
