//! References
//! - [OSDev wiki: Floppy Disk Controller](https://wiki.osdev.org/Floppy_Disk_Controller)
//! - [82077AA datasheet (PDF)](http://www.buchty.net/casio/files/82077.pdf)

#![allow(non_camel_case_types)]

use enumflags2::{bitflags, BitFlags};

/// Multitrack + MFM，READ/WRITE DATA 共用
const MT_MFM: u8 = 0xC0;

/// Digital Output Register
#[rustfmt::skip]
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dor {
    DRIVE_SEL0 = 1 << 0,
    DRIVE_SEL1 = 1 << 1,
    NOT_RESET  = 1 << 2,
    IRQ_DMA    = 1 << 3,
    MOTOR_A    = 1 << 4,
    MOTOR_B    = 1 << 5,
    MOTOR_C    = 1 << 6,
    MOTOR_D    = 1 << 7,
}

/// Main Status Register
#[rustfmt::skip]
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msr {
    ACT_A = 1 << 0,
    ACT_B = 1 << 1,
    ACT_C = 1 << 2,
    ACT_D = 1 << 3,
    BUSY  = 1 << 4,
    NDMA  = 1 << 5,
    DIO   = 1 << 6,
    RQM   = 1 << 7,
}

/// Status Register 0
#[rustfmt::skip]
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum St0 {
    UNIT_SEL0       = 1 << 0,
    UNIT_SEL1       = 1 << 1,
    HEAD            = 1 << 2,
    NOT_READY       = 1 << 3,
    EQUIPMENT_CHECK = 1 << 4,
    SEEK_END        = 1 << 5,
    /// 中断码两位不全为0表示命令异常结束
    INT_CODE0       = 1 << 6,
    INT_CODE1       = 1 << 7,
}

/// Status Register 1
#[rustfmt::skip]
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum St1 {
    MISSING_ADDRESS = 1 << 0,
    NOT_WRITABLE    = 1 << 1,
    NO_DATA         = 1 << 2,
    OVERRUN         = 1 << 4,
    DATA_ERROR      = 1 << 5,
    END_OF_CYLINDER = 1 << 7,
}

/// Status Register 2
#[rustfmt::skip]
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum St2 {
    MISSING_DATA_MARK = 1 << 0,
    BAD_CYLINDER      = 1 << 1,
    WRONG_CYLINDER    = 1 << 4,
    DATA_ERROR_FIELD  = 1 << 5,
    CONTROL_MARK      = 1 << 6,
}

/// 本驱动用到的控制器命令
#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Specify        = 3,
    WriteData      = 5 | MT_MFM,
    ReadData       = 6 | MT_MFM,
    Recalibrate    = 7,
    SenseInterrupt = 8,
    Seek           = 15,
}

/// 控制器启用、DMA 与中断打开、马达全关
#[inline]
pub fn dor_enabled() -> BitFlags<Dor> {
    Dor::NOT_RESET | Dor::IRQ_DMA
}

/// 在启用状态下打开0号驱动器的马达
#[inline]
pub fn dor_motor_a() -> BitFlags<Dor> {
    dor_enabled() | Dor::MOTOR_A
}
