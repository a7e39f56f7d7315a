//! Constants used by the floppy driver

use track_dev::TRACK_SIZE;

/// 主软驱控制器的端口基址
pub const FLOPPY_BASE: u16 = 0x03F0;

/// 数字输出寄存器，只写
pub const DOR: u16 = 2;
/// 主状态寄存器，只读
pub const MSR: u16 = 4;
/// 数据 FIFO，命令与结果都经过它
pub const FIFO: u16 = 5;
/// 配置控制寄存器，只写
pub const CCR: u16 = 7;

/// 每次 DMA 传输的字节数
pub const DMA_LENGTH: usize = TRACK_SIZE;

/// 扇区大小编码：128 * 2^2 = 512 字节
pub const SECTOR_SIZE_CODE: u8 = 2;
/// 每条磁道的扇区数（1.44MB 3.5"）
pub const SECTORS_PER_TRACK: u8 = 18;
/// GAP3 长度，3.5" 的默认值
pub const GAP3_LENGTH: u8 = 0x1B;
/// 扇区大小编码非零时数据长度填 0xFF
pub const DATA_LENGTH: u8 = 0xFF;

/// SPECIFY 第一字节：步进 3ms，磁头卸载 240ms
pub const SPECIFY_STEP_UNLOAD: u8 = 0xDF;
/// SPECIFY 第二字节：磁头加载 16ms，使用 DMA
pub const SPECIFY_LOAD_DMA: u8 = 0x02;
/// CCR：500kb/s
pub const TRANSFER_RATE_500K: u8 = 0x00;

/// 驱动器的时序与重试参数
///
/// 默认值：中断等待退化为固定 500ms 延时，
/// 传输的首轮结果无条件视为成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub base: u16,
    /// 轮询 MSR 就绪位的最大次数
    pub ready_spins: u32,
    /// “等待中断”的固定延时
    pub irq_wait_ms: u32,
    /// 马达上电后的起转延时
    pub motor_spinup_ms: u32,
    /// 寻道后、发出传输命令前的稳定延时
    pub settle_ms: u32,
    /// 校准与寻道的尝试次数
    pub seek_retries: u32,
    /// 磁道传输的尝试次数
    pub transfer_retries: u32,
    /// 是否检查传输结果并据此重试
    pub verify_transfer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: FLOPPY_BASE,
            ready_spins: 100_000,
            irq_wait_ms: 500,
            motor_spinup_ms: 500,
            settle_ms: 100,
            seek_retries: 10,
            transfer_retries: 20,
            verify_transfer: false,
        }
    }
}
