//! 模拟的软驱控制器：按命令长度收集 FIFO 字节，执行后把结果排入队列。

use std::collections::VecDeque;

use floppy::{Delay, PortIo};

pub const SPECIFY: u8 = 3;
pub const RECALIBRATE: u8 = 7;
pub const SENSE_INTERRUPT: u8 = 8;
pub const SEEK: u8 = 15;
pub const WRITE_DATA: u8 = 0xC5;
pub const READ_DATA: u8 = 0xC6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// 校准和寻道总是停在错误的柱面
    WrongCylinder,
    /// MSR 的 RQM 位永不置位
    NeverReady,
    /// 传输结果报告异常结束
    BadTransferStatus,
}

#[derive(Debug)]
pub struct SimulatedController {
    pub fault: Fault,
    pub cmos: u8,
    pub cylinder: u8,
    pub dor: Vec<u8>,
    pub ccr: Vec<u8>,
    pub commands: Vec<Vec<u8>>,
    pub dma: Vec<(u16, u8)>,
    pending: Vec<u8>,
    results: VecDeque<u8>,
}

impl SimulatedController {
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            cmos: 0x40,
            cylinder: 0,
            dor: Vec::new(),
            ccr: Vec::new(),
            commands: Vec::new(),
            dma: Vec::new(),
            pending: Vec::new(),
            results: VecDeque::new(),
        }
    }

    /// 某个操作码被完整发出的次数
    pub fn count(&self, opcode: u8) -> usize {
        self.commands.iter().filter(|cmd| cmd[0] == opcode).count()
    }

    pub fn find(&self, opcode: u8) -> Vec<&[u8]> {
        self.commands
            .iter()
            .filter(|cmd| cmd[0] == opcode)
            .map(Vec::as_slice)
            .collect()
    }

    fn command_len(opcode: u8) -> usize {
        match opcode {
            SPECIFY | SEEK => 3,
            RECALIBRATE => 2,
            READ_DATA | WRITE_DATA => 9,
            _ => 1,
        }
    }

    fn execute(&mut self) {
        let cmd = std::mem::take(&mut self.pending);
        match cmd[0] {
            RECALIBRATE => {
                self.cylinder = match self.fault {
                    Fault::WrongCylinder => 1,
                    _ => 0,
                }
            }
            SEEK => {
                self.cylinder = match self.fault {
                    Fault::WrongCylinder => cmd[2].wrapping_add(1),
                    _ => cmd[2],
                }
            }
            SENSE_INTERRUPT => self.results.extend([0x20, self.cylinder]),
            READ_DATA | WRITE_DATA => {
                let st0 = match self.fault {
                    Fault::BadTransferStatus => 0x40,
                    _ => 0x00,
                };
                self.results.extend([st0, 0, 0, cmd[2], 1, 1, 2]);
            }
            _ => {}
        }
        self.commands.push(cmd);
    }
}

impl PortIo for SimulatedController {
    fn read_u8(&mut self, port: u16) -> u8 {
        match port {
            0x3F4 if self.fault == Fault::NeverReady => 0x00,
            0x3F4 => 0x80,
            0x3F5 => self.results.pop_front().unwrap_or(0),
            0x71 => self.cmos,
            _ => 0,
        }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        match port {
            0x3F2 => self.dor.push(value),
            0x3F5 => {
                self.pending.push(value);
                if self.pending.len() == Self::command_len(self.pending[0]) {
                    self.execute();
                }
            }
            0x3F7 => self.ccr.push(value),
            0x04 | 0x05 | 0x0A | 0x0B | 0x0C | 0x81 => self.dma.push((port, value)),
            _ => {}
        }
    }
}

/// 只记录请求的延时，不真正等待
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub sleeps: Vec<u32>,
}

impl RecordingDelay {
    pub fn total(&self) -> u32 {
        self.sleeps.iter().sum()
    }
}

impl Delay for RecordingDelay {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }
}
