//! # 暂存缓冲区
//!
//! 软驱控制器只能通过 DMA 通道2 访问物理内存的低 16MiB，
//! 且一次传输不能跨越 64KiB 边界。
//! 因此内核静态预留一块按 16KiB 对齐的区域，所有磁道读写都经过它。
//!
//! 缓冲区由 [`StagingBuffer`] 唯一持有，同一时刻只能被一个操作借用。

use alloc::boxed::Box;
use core::fmt;
use core::ops::{Deref, DerefMut};

use spin::{Mutex, MutexGuard};

use crate::TRACK_SIZE;

/// DMA 可直接访问的一块磁道大小的内存
#[repr(C, align(16384))]
pub struct DmaRegion([u8; TRACK_SIZE]);

impl DmaRegion {
    pub const fn zeroed() -> Self {
        Self([0; TRACK_SIZE])
    }
}

static STATIC_REGION: Mutex<DmaRegion> = Mutex::new(DmaRegion::zeroed());

/// 暂存缓冲区的句柄
///
/// 持有句柄即独占缓冲区；句柄销毁后静态区域才能被再次取出。
pub struct StagingBuffer {
    region: Region,
}

enum Region {
    /// 内核的静态 DMA 区域，锁守卫就是所有权
    Static(MutexGuard<'static, DmaRegion>),
    /// 宿主工具与测试使用的堆上区域，不可用于真实 DMA
    Heap(Box<DmaRegion>),
}

impl StagingBuffer {
    /// 取出静态 DMA 区域，已被持有时返回空
    pub fn take() -> Option<Self> {
        STATIC_REGION.try_lock().map(|guard| Self {
            region: Region::Static(guard),
        })
    }

    /// 在堆上分配一块缓冲区
    pub fn boxed() -> Self {
        Self {
            region: Region::Heap(Box::new(DmaRegion::zeroed())),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// 缓冲区起始地址，供 DMA 控制器编程使用。
    /// 内核恒等映射低端内存，故虚拟地址即物理地址。
    #[inline]
    pub fn dma_address(&self) -> usize {
        self.as_ptr() as usize
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.region, Region::Static(_))
    }

    fn region(&self) -> &DmaRegion {
        match &self.region {
            Region::Static(guard) => &**guard,
            Region::Heap(region) => &**region,
        }
    }

    fn region_mut(&mut self) -> &mut DmaRegion {
        match &mut self.region {
            Region::Static(guard) => &mut **guard,
            Region::Heap(region) => &mut **region,
        }
    }
}

impl Deref for StagingBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.region().0
    }
}

impl DerefMut for StagingBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.region_mut().0
    }
}

impl fmt::Debug for StagingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagingBuffer")
            .field("address", &format_args!("{:#x}", self.dma_address()))
            .field("static", &self.is_static())
            .finish()
    }
}
