//! 端口读写与定时等待
//!
//! 二者都属于内核的其余部分，驱动只通过特质使用它们。

/// 字节宽度的 I/O 端口访问
pub trait PortIo {
    fn read_u8(&mut self, port: u16) -> u8;
    fn write_u8(&mut self, port: u16, value: u8);
}

/// 固定时长的等待，不让出处理器
pub trait Delay {
    fn sleep_ms(&mut self, ms: u32);
}

impl<T: PortIo + ?Sized> PortIo for &mut T {
    #[inline]
    fn read_u8(&mut self, port: u16) -> u8 {
        (**self).read_u8(port)
    }

    #[inline]
    fn write_u8(&mut self, port: u16, value: u8) {
        (**self).write_u8(port, value)
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    #[inline]
    fn sleep_ms(&mut self, ms: u32) {
        (**self).sleep_ms(ms)
    }
}

/// 空转计时，需要按处理器频率标定 `spins_per_ms`
#[derive(Debug, Clone, Copy)]
pub struct BusyLoop {
    pub spins_per_ms: u32,
}

impl Delay for BusyLoop {
    fn sleep_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            for _ in 0..self.spins_per_ms {
                core::hint::spin_loop();
            }
        }
    }
}

#[cfg(target_arch = "x86_64")]
pub use self::hardware::HardwarePorts;

#[cfg(target_arch = "x86_64")]
mod hardware {
    use x86_64::instructions::port::Port;

    use super::PortIo;

    /// 真实的 x86 I/O 端口
    #[derive(Debug)]
    pub struct HardwarePorts(());

    impl HardwarePorts {
        /// # Safety
        ///
        /// 调用者须保证软驱控制器、DMA 通道2 与 CMOS 端口只由这一个实例访问。
        pub unsafe fn new() -> Self {
            Self(())
        }
    }

    impl PortIo for HardwarePorts {
        fn read_u8(&mut self, port: u16) -> u8 {
            unsafe { Port::<u8>::new(port).read() }
        }

        fn write_u8(&mut self, port: u16, value: u8) {
            unsafe { Port::<u8>::new(port).write(value) }
        }
    }
}
