//! ISA DMA 通道2 的编程
//!
//! 8237 控制器只有 16 位地址加 8 位页寄存器，能访问物理内存的低 16MiB。

use crate::controller::Direction;
use crate::port::PortIo;

/// 单字节寄存器的屏蔽位
const SINGLE_MASK: u16 = 0x0A;
/// 模式寄存器
const MODE: u16 = 0x0B;
/// 高低字节触发器复位
const FLIP_FLOP_RESET: u16 = 0x0C;
/// 通道2地址
const CHAN2_ADDR: u16 = 0x04;
/// 通道2计数
const CHAN2_COUNT: u16 = 0x05;
/// 通道2页寄存器
const CHAN2_PAGE: u16 = 0x81;

const MASK_CHAN2: u8 = 0x06;
const UNMASK_CHAN2: u8 = 0x02;

/// DMA 能访问的最高地址
pub const DMA_LIMIT: usize = 0xFF_FFFF;

impl Direction {
    /// 01:0:0:01:10 = single/inc/no-auto/to-mem/chan2
    /// 01:0:0:10:10 = single/inc/no-auto/from-mem/chan2
    #[inline]
    pub fn dma_mode(self) -> u8 {
        match self {
            Direction::Read => 0x46,
            Direction::Write => 0x4A,
        }
    }
}

/// 为一次 `len` 字节的传输设置通道2
pub fn program(ports: &mut impl PortIo, dir: Direction, address: usize, len: usize) {
    if address > DMA_LIMIT {
        log::warn!("dma: buffer {address:#x} above 16MiB, address truncated");
    }
    let addr = (address as u32).to_le_bytes();
    // DMA 计数从0开始，故减一
    let count = (len as u32 - 1).to_le_bytes();

    ports.write_u8(SINGLE_MASK, MASK_CHAN2);

    ports.write_u8(FLIP_FLOP_RESET, 0xFF);
    ports.write_u8(CHAN2_ADDR, addr[0]);
    ports.write_u8(CHAN2_ADDR, addr[1]);

    ports.write_u8(CHAN2_PAGE, addr[2]);

    ports.write_u8(FLIP_FLOP_RESET, 0xFF);
    ports.write_u8(CHAN2_COUNT, count[0]);
    ports.write_u8(CHAN2_COUNT, count[1]);

    ports.write_u8(MODE, dir.dma_mode());

    ports.write_u8(SINGLE_MASK, UNMASK_CHAN2);
}
