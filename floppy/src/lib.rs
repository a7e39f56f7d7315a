//! # 软驱控制器驱动
//!
//! 面向 82077AA 兼容的软盘控制器，只支持0号驱动器。
//!
//! ## 分层（自上而下）
//!
//! 1. 磁道传输：寻道 + DMA + READ/WRITE DATA 命令
//! 2. 协议命令：复位、校准、寻道、马达控制
//! 3. 寄存器与 DMA 通道编程
//! 4. 端口读写与定时等待（由内核提供）

#![no_std]

mod cmos;
pub mod config;
mod controller;
mod dma;
mod port;
pub mod regs;

pub use self::{
    cmos::DriveType,
    config::Config,
    controller::{Direction, FloppyController, MotorState, TransferStatus},
    port::{BusyLoop, Delay, PortIo},
};

#[cfg(target_arch = "x86_64")]
pub use self::port::HardwarePorts;
