use track_dev::{StagingBuffer, TrackDevice};

use crate::{
    directory,
    exec::{self, Argv},
    layout::{self, FileView, Names},
    Capacity, Error, Result, TrackIndex, TrackStore, CONTENT_MAX_LEN,
};

/// 单层目录、一个文件占一条磁道的文件系统
///
/// 文件只能创建、读取与执行，没有删除与改写。
pub struct TrackFileSystem<D> {
    store: TrackStore<D>,
}

impl<D: TrackDevice> TrackFileSystem<D> {
    /// 挂上设备，只清空暂存缓冲区，不写盘
    pub fn install(device: D, buffer: StagingBuffer) -> Self {
        let mut store = TrackStore::new(device, buffer);
        store.clear_buffer();
        log::info!("trackfs: installed");
        Self { store }
    }

    /// 写一张空的记录表
    pub fn format(&mut self) -> Result<()> {
        self.store.clear_buffer();
        self.store.write_buffer(TrackIndex::RECORD)?;
        log::info!("trackfs: formatted");
        Ok(())
    }

    /// 先登记名字，再把内容写到分配的磁道
    pub fn create(&mut self, name: &str, content: &[u8]) -> Result<TrackIndex> {
        if content.len() > CONTENT_MAX_LEN {
            return Err(Error::CapacityExceeded(Capacity::ContentLength));
        }
        let track = directory::append(&mut self.store, name)?;

        self.store.clear_buffer();
        layout::write_file(self.store.buffer_mut(), name, content).ok_or(Error::Corrupt(track))?;
        self.store.write_buffer(track).map_err(|cause| {
            log::error!("trackfs: {name:?} registered but track {track} not written: {cause}");
            Error::PartialWrite { track, cause }
        })?;

        log::info!("trackfs: created {name:?} ({} bytes) on track {track}", content.len());
        Ok(track)
    }

    /// 把文件所在磁道读入暂存缓冲区
    pub fn open(&mut self, name: &str) -> Result<FileView<'_>> {
        let track = directory::find(&mut self.store, name)?;
        self.store.read_buffer(track)?;
        FileView::parse(self.store.buffer()).ok_or(Error::Corrupt(track))
    }

    /// 文件内容，不含结尾的 \0
    pub fn read(&mut self, name: &str) -> Result<&[u8]> {
        Ok(self.open(name)?.content())
    }

    pub fn find(&mut self, name: &str) -> Result<TrackIndex> {
        directory::find(&mut self.store, name)
    }

    pub fn list(&mut self) -> Result<Names<'_>> {
        directory::list(&mut self.store)
    }

    /// 以 `[name, args..]` 为参数执行文件，返回它的退出码
    ///
    /// # Safety
    ///
    /// 文件数据必须是满足 [`exec::invoke`] 要求的机器码。
    pub unsafe fn execute(&mut self, name: &str, args: &[&str]) -> Result<i32> {
        let argv = Argv::new(name, args).ok_or(Error::InvalidArgument)?;
        let file = self.open(name)?;
        log::info!("trackfs: execute {name:?} with {} args", args.len());
        Ok(unsafe { exec::invoke(file.data(), &argv) })
    }
}

impl<D> TrackFileSystem<D> {
    pub fn store(&self) -> &TrackStore<D> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TrackStore<D> {
        &mut self.store
    }

    pub fn into_parts(self) -> (D, StagingBuffer) {
        self.store.into_parts()
    }
}
